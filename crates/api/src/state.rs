use std::sync::Arc;

use relatorio_core::time::Clock;
use relatorio_db::store::{ProjectStore, UserStore};

use crate::cache::ProjectCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// Project collection.
    pub store: Arc<dyn ProjectStore>,
    /// Login accounts.
    pub users: Arc<dyn UserStore>,
    /// Memo of the full project list, invalidated on every write.
    pub cache: Arc<ProjectCache>,
    /// Time source for progress computation.
    pub clock: Clock,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
