//! Login support: password hashing and the startup account.

pub mod password;

use relatorio_db::models::user::CreateUser;
use relatorio_db::store::UserStore;

use crate::config::BootstrapUser;
use crate::error::{AppError, AppResult};

/// Create the configured account, or reset its password if it exists.
pub async fn ensure_bootstrap_user(users: &dyn UserStore, account: &BootstrapUser) -> AppResult<()> {
    let password_hash = password::hash_password(&account.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = users
        .upsert(&CreateUser {
            username: account.username.clone(),
            password_hash,
        })
        .await?;
    tracing::info!(user_id = %user.id, username = %user.username, "Bootstrap account ready");
    Ok(())
}
