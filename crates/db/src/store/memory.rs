use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use relatorio_core::types::RecordId;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProjectStore, StoreError, UserStore};
use crate::models::project::{Project, ProjectFields};
use crate::models::user::{CreateUser, User};

/// Process-local store for tests and `STORE_BACKEND=memory`.
///
/// Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    projects: RwLock<HashMap<RecordId, Project>>,
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored projects.
    pub async fn project_count(&self) -> usize {
        self.projects.read().await.len()
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<Project> = self.projects.read().await.values().cloned().collect();
        projects.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(projects)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn create(&self, fields: &ProjectFields) -> Result<Project, StoreError> {
        let now = Utc::now();
        let project = Project {
            id: Uuid::now_v7(),
            name: fields.name.clone(),
            description: fields.description.clone(),
            status: fields.status.clone(),
            current_status: fields.current_status.clone(),
            start_date: fields.start_date,
            deadline: fields.deadline,
            created_at: now,
            updated_at: now,
        };
        self.projects
            .write()
            .await
            .insert(project.id, project.clone());
        Ok(project)
    }

    async fn replace(
        &self,
        id: RecordId,
        fields: &ProjectFields,
    ) -> Result<Option<Project>, StoreError> {
        let mut projects = self.projects.write().await;
        let Some(project) = projects.get_mut(&id) else {
            return Ok(None);
        };
        project.name = fields.name.clone();
        project.description = fields.description.clone();
        project.status = fields.status.clone();
        project.current_status = fields.current_status.clone();
        project.start_date = fields.start_date;
        project.deadline = fields.deadline;
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        Ok(self.projects.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn upsert(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        let user = users
            .entry(input.username.clone())
            .and_modify(|u| u.password_hash = input.password_hash.clone())
            .or_insert_with(|| User {
                id: Uuid::now_v7(),
                username: input.username.clone(),
                password_hash: input.password_hash.clone(),
                created_at: Utc::now(),
            });
        Ok(user.clone())
    }
}
