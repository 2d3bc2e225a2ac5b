//! Store traits consumed by the API layer.
//!
//! Not-found is not an error at this level: point operations return
//! `Option`/`bool` the same way the repositories do, and callers decide how
//! to surface it. [`StoreError`] is reserved for the store being unusable.

use async_trait::async_trait;
use relatorio_core::types::RecordId;

use crate::models::project::{Project, ProjectFields, ProjectPatch};
use crate::models::user::{CreateUser, User};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Transport or database failure. Never retried.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database answered but the statement failed.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// The database could not be reached at all.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

/// Read/write access to the project collection.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Every project. No pagination.
    async fn list_all(&self) -> Result<Vec<Project>, StoreError>;

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Project>, StoreError>;

    /// Insert a project; the store assigns the id and both timestamps.
    async fn create(&self, fields: &ProjectFields) -> Result<Project, StoreError>;

    /// Overwrite all mutable fields. `None` if `id` does not exist.
    async fn replace(
        &self,
        id: RecordId,
        fields: &ProjectFields,
    ) -> Result<Option<Project>, StoreError>;

    /// Merge `patch` onto the stored record and write it back.
    ///
    /// Read-merge-write: a concurrent writer between the two steps is
    /// overwritten.
    async fn patch(
        &self,
        id: RecordId,
        patch: &ProjectPatch,
    ) -> Result<Option<Project>, StoreError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let merged = existing.fields().apply(patch);
        self.replace(id, &merged).await
    }

    /// Hard delete. `false` if `id` does not exist.
    async fn delete(&self, id: RecordId) -> Result<bool, StoreError>;

    /// Cheap reachability probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Login accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn upsert(&self, input: &CreateUser) -> Result<User, StoreError>;
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn connection_failures_are_unavailable() {
        assert_matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        );
        assert_matches!(
            StoreError::from(sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        );
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert_matches!(
            StoreError::from(sqlx::Error::Io(refused)),
            StoreError::Unavailable(_)
        );
    }

    #[test]
    fn statement_failures_stay_database_errors() {
        assert_matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Database(sqlx::Error::RowNotFound)
        );
    }
}
