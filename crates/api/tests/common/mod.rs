#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use relatorio_api::cache::ProjectCache;
use relatorio_api::config::{ServerConfig, StoreBackend};
use relatorio_api::router::build_app_router;
use relatorio_api::state::AppState;
use relatorio_core::time::Clock;
use relatorio_core::types::Timestamp;
use relatorio_db::store::{MemoryStore, ProjectStore, UserStore};

/// Instant the test clock is frozen at: 2024-06-15T12:00:00Z.
pub fn test_now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        cache_enabled: true,
        static_dir: None,
        bootstrap_user: None,
    }
}

/// State over a fresh in-memory store with the clock frozen at [`test_now`].
pub fn test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = state_with(store.clone(), store.clone());
    (state, store)
}

/// State over arbitrary store implementations.
pub fn state_with(store: Arc<dyn ProjectStore>, users: Arc<dyn UserStore>) -> AppState {
    AppState {
        store,
        users,
        cache: Arc::new(ProjectCache::new()),
        clock: Clock::fixed(test_now()),
        config: Arc::new(test_config()),
    }
}

/// Build the full application router, with the production middleware stack.
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state, &test_config())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Create a project through the API and return its JSON.
pub async fn create_project(app: Router, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(app, "/projects", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
