use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// `GET /dashboard`.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard::report))
}
