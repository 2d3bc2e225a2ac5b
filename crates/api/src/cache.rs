//! Single-slot memo of the full project list.
//!
//! Correctness rests on invalidate-on-write only; there is no TTL. Every
//! [`ProjectCache::invalidate`] bumps a generation counter and a list is only
//! installed if no invalidation happened since the caller read the
//! generation, so a slow reader cannot put back a list that predates a write.
//! Two readers missing at the same time will both query the store.

use std::sync::Arc;

use relatorio_db::models::project::Project;
use tokio::sync::RwLock;

#[derive(Default)]
struct Slot {
    generation: u64,
    projects: Option<Arc<Vec<Project>>>,
}

/// Shared through [`AppState`](crate::state::AppState); one per API instance.
pub struct ProjectCache {
    enabled: bool,
    slot: RwLock<Slot>,
}

impl ProjectCache {
    pub fn new() -> Self {
        Self {
            enabled: true,
            slot: RwLock::new(Slot::default()),
        }
    }

    /// A cache that never holds anything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The cached list, if any.
    pub async fn get(&self) -> Option<Arc<Vec<Project>>> {
        if !self.enabled {
            return None;
        }
        self.slot.read().await.projects.clone()
    }

    /// Current generation. Read it before querying the store and pass it
    /// to [`ProjectCache::set`].
    pub async fn generation(&self) -> u64 {
        self.slot.read().await.generation
    }

    /// Install `projects` unless the cache was invalidated after
    /// `generation` was read. Returns whether the list was stored.
    pub async fn set(&self, generation: u64, projects: Arc<Vec<Project>>) -> bool {
        if !self.enabled {
            return false;
        }
        let mut slot = self.slot.write().await;
        if slot.generation != generation {
            return false;
        }
        slot.projects = Some(projects);
        true
    }

    /// Drop the cached list. Called after every successful write.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        slot.generation = slot.generation.wrapping_add(1);
        slot.projects = None;
    }
}

impl Default for ProjectCache {
    fn default() -> Self {
        Self::new()
    }
}
