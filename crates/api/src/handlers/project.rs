//! Handlers for the `/projects` resource.
//!
//! Every body is validated before the store is touched, and every
//! successful write invalidates the list cache before responding.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use relatorio_core::error::CoreError;
use relatorio_core::project::{parse_record_id, ENTITY_PROJECT};
use relatorio_core::types::RecordId;
use relatorio_db::models::project::{Project, ProjectInput, ProjectPatchInput};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Serve the project list from the cache, filling it from the store on a miss.
pub async fn load_projects(state: &AppState) -> AppResult<Arc<Vec<Project>>> {
    if let Some(projects) = state.cache.get().await {
        tracing::debug!(count = projects.len(), "Project list served from cache");
        return Ok(projects);
    }

    let generation = state.cache.generation().await;
    let projects = Arc::new(state.store.list_all().await?);
    if state.cache.set(generation, Arc::clone(&projects)).await {
        tracing::debug!(count = projects.len(), "Project list cached");
    }
    Ok(projects)
}

fn not_found(id: RecordId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_PROJECT,
        id: id.to_string(),
    })
}

/// GET /projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = load_projects(&state).await?;
    Ok(Json(projects.as_ref().clone()))
}

/// POST /projects
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<ProjectInput>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let fields = input.into_fields()?;
    let project = state.store.create(&fields).await?;
    state.cache.invalidate().await;

    tracing::info!(project_id = %project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Project>> {
    let id = parse_record_id(ENTITY_PROJECT, &raw_id)?;
    let project = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(project))
}

/// PUT /projects/{id}
///
/// Full replace: `name` and `status` are required and omitted optional
/// fields are reset to their defaults.
pub async fn replace(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<ProjectInput>,
) -> AppResult<Json<Project>> {
    let fields = input.into_fields()?;
    let id = parse_record_id(ENTITY_PROJECT, &raw_id)?;

    let project = state
        .store
        .replace(id, &fields)
        .await?
        .ok_or_else(|| not_found(id))?;
    state.cache.invalidate().await;

    tracing::info!(project_id = %id, "Project replaced");
    Ok(Json(project))
}

/// PATCH /projects/{id}
///
/// Partial update: only the supplied fields change.
pub async fn patch(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<ProjectPatchInput>,
) -> AppResult<Json<Project>> {
    let patch = input.into_patch()?;
    let id = parse_record_id(ENTITY_PROJECT, &raw_id)?;

    let project = state
        .store
        .patch(id, &patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    state.cache.invalidate().await;

    tracing::info!(project_id = %id, "Project patched");
    Ok(Json(project))
}

/// DELETE /projects/{id}
///
/// Hard delete. Deleting an id that does not exist (including one already
/// deleted) is a 404.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_record_id(ENTITY_PROJECT, &raw_id)?;

    if !state.store.delete(id).await? {
        return Err(not_found(id));
    }
    state.cache.invalidate().await;

    tracing::info!(project_id = %id, "Project deleted");
    Ok(Json(MessageResponse::new("Project deleted")))
}

/// DELETE /projects
pub async fn delete_without_id() -> AppResult<Json<MessageResponse>> {
    Err(AppError::BadRequest("project id is required".into()))
}
