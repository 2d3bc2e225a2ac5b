//! Handler for `POST /login`.

use axum::extract::State;
use axum::Json;
use relatorio_core::error::CoreError;
use serde::Deserialize;

use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::MessageResponse;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /login
///
/// Check a username/password pair. Unknown users and wrong passwords get
/// the same 401 so the response does not reveal which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<MessageResponse>> {
    let (Some(username), Some(password)) = (
        input.username.filter(|u| !u.trim().is_empty()),
        input.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Core(CoreError::Validation(
            "username and password are required".into(),
        )));
    };

    let Some(user) = state.users.find_by_username(username.trim()).await? else {
        tracing::info!(username = %username, "Login rejected: unknown user");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    };

    let valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    tracing::info!(user_id = %user.id, "Login succeeded");
    Ok(Json(MessageResponse::new("Login successful")))
}
