use async_trait::async_trait;
use relatorio_core::types::RecordId;

use super::{ProjectStore, StoreError, UserStore};
use crate::models::project::{Project, ProjectFields};
use crate::models::user::{CreateUser, User};
use crate::repositories::{ProjectRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL-backed store. Cheap to clone.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn list_all(&self) -> Result<Vec<Project>, StoreError> {
        Ok(ProjectRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Project>, StoreError> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create(&self, fields: &ProjectFields) -> Result<Project, StoreError> {
        Ok(ProjectRepo::create(&self.pool, fields).await?)
    }

    async fn replace(
        &self,
        id: RecordId,
        fields: &ProjectFields,
    ) -> Result<Option<Project>, StoreError> {
        Ok(ProjectRepo::replace(&self.pool, id, fields).await?)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        Ok(ProjectRepo::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn upsert(&self, input: &CreateUser) -> Result<User, StoreError> {
        Ok(UserRepo::upsert(&self.pool, input).await?)
    }
}
