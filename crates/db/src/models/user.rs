//! Login account model.

use relatorio_core::types::{RecordId, Timestamp};
use sqlx::FromRow;

/// A row from the `users` table. Not serializable: the hash never leaves
/// the server.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// DTO for creating or re-keying an account.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}
