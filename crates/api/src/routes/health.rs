use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Plain-text body of `GET /`.
pub const LIVENESS_MESSAGE: &str = "Project tracker API is running";

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Configured store backend (`postgres` or `memory`).
    pub store_backend: &'static str,
    /// Whether the project store answered a ping.
    pub store_healthy: bool,
}

/// GET / -- liveness only, never touches the store.
async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// GET /health -- service and store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Store ping failed");
            false
        }
    };

    let status = if store_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_backend: state.config.store_backend.as_str(),
        store_healthy,
    })
}

/// Mount liveness and health routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
}
