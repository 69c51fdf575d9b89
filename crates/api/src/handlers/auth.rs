//! Handler for `POST /auth/login`.

use axum::extract::State;
use axum::Json;
use movingday_core::error::CoreError;
use movingday_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

const BAD_CREDENTIALS: &str = "Incorrect user_name or password";

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user_name: Option<String>,
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub auth_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

fn bad_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(BAD_CREDENTIALS.into()))
}

/// POST /api/v1/auth/login
///
/// Exchange `user_name` + `password` for a bearer token. An unknown user and a
/// wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user_name = input
        .user_name
        .as_deref()
        .ok_or_else(|| AppError::Core(CoreError::missing_field("user_name")))?;
    let password = input
        .password
        .as_deref()
        .ok_or_else(|| AppError::Core(CoreError::missing_field("password")))?;

    let user = UserRepo::find_by_user_name(&state.pool, user_name)
        .await?
        .ok_or_else(bad_credentials)?;

    let password_valid = verify_password(password, &user.password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(bad_credentials());
    }

    let auth_token = state
        .tokens
        .issue(&user)
        .map_err(|e| AppError::InternalError(format!("Token signing error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        auth_token,
        expires_in: state.tokens.expires_in_secs(),
    }))
}
