pub mod auth;
pub mod dashboard;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree (mounted at the root, next to the health routes).
///
/// Route hierarchy:
///
/// ```text
/// /login                 login (public)
/// /projects              list, create
/// /projects/{id}         get, replace, patch, delete
/// /dashboard             progress table + chart series
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(project::router())
        .merge(dashboard::router())
}
