//! Repository for the `projects` table.

use relatorio_core::types::RecordId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::project::{Project, ProjectFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, status, current_status, start_date, deadline, \
                       created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with a freshly generated id, returning the created row.
    pub async fn create(pool: &PgPool, input: &ProjectFields) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (id, name, description, status, current_status, start_date, deadline)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(Uuid::now_v7())
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.current_status)
            .bind(input.start_date)
            .bind(input.deadline)
            .fetch_one(pool)
            .await
    }

    /// Find a project by id.
    pub async fn find_by_id(pool: &PgPool, id: RecordId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Overwrite every mutable column of a project and refresh `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: RecordId,
        input: &ProjectFields,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = $2,
                description = $3,
                status = $4,
                current_status = $5,
                start_date = $6,
                deadline = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.current_status)
            .bind(input.start_date)
            .bind(input.deadline)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: RecordId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
