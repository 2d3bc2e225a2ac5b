//! Handler for the dashboard view model.

use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::project::load_projects;
use crate::report::ProgressReport;
use crate::state::AppState;

/// GET /dashboard
///
/// Table rows and chart series for every project, with progress computed
/// at the state clock's current instant.
pub async fn report(State(state): State<AppState>) -> AppResult<Json<ProgressReport>> {
    let projects = load_projects(&state).await?;
    Ok(Json(ProgressReport::build(&projects, state.clock.now())))
}
