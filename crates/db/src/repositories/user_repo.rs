//! Repository for the `users` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, username, password_hash, created_at";

pub struct UserRepo;

impl UserRepo {
    /// Look up an account by its exact username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Insert an account, or replace the password hash if the username exists.
    pub async fn upsert(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, username, password_hash)
             VALUES ($1, $2, $3)
             ON CONFLICT (username) DO UPDATE SET password_hash = EXCLUDED.password_hash
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(Uuid::now_v7())
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }
}
