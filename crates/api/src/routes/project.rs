//! Route definitions for the `/projects` resource.

use axum::routing::{get, MethodRouter};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

fn collection() -> MethodRouter<AppState> {
    get(project::list)
        .post(project::create)
        .delete(project::delete_without_id)
}

/// Routes for the project collection and its members.
///
/// ```text
/// GET    /projects        -> list
/// POST   /projects        -> create
/// DELETE /projects        -> delete_without_id (400)
/// GET    /projects/{id}   -> get_by_id
/// PUT    /projects/{id}   -> replace
/// PATCH  /projects/{id}   -> patch
/// DELETE /projects/{id}   -> delete
/// ```
///
/// `/projects/` answers the same as `/projects`, so an empty trailing id
/// segment is a missing id rather than an unknown route.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", collection())
        .route("/projects/", collection())
        .route(
            "/projects/{id}",
            get(project::get_by_id)
                .put(project::replace)
                .patch(project::patch)
                .delete(project::delete),
        )
}
