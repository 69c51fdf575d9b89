//! Handlers for the `/users` resource: registration and the caller's profile.

use axum::extract::State;
use axum::http::{header, HeaderName, StatusCode};
use axum::Json;
use chrono::NaiveDate;
use movingday_core::error::CoreError;
use movingday_core::password::validate_password;
use movingday_core::resource::present;
use movingday_core::sanitize::PublicShape;
use movingday_core::types::CalendarDate;
use movingday_db::models::user::{CreateUser, UpdateProfile, UserResponse};
use movingday_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{unique_violation, AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const USER_NAME_CONSTRAINT: &str = "uq_movingday_users_user_name";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`. Required fields are checked by the handler
/// so a missing one is reported by name.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub notes: Option<String>,
    pub moving_date: Option<String>,
}

/// Request body for `PATCH /users`.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub notes: Option<String>,
    pub moving_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, AppError> {
    present(value).ok_or_else(|| AppError::Core(CoreError::missing_field(field)))
}

/// Parse an optional `YYYY-MM-DD` date. Blank counts as absent.
fn parse_moving_date(value: &Option<String>) -> Result<Option<CalendarDate>, AppError> {
    present(value)
        .map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                AppError::Core(CoreError::Validation(
                    "'moving_date' must be a date in YYYY-MM-DD format".into(),
                ))
            })
        })
        .transpose()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Register a new account. Checks run in a fixed order: required fields,
/// password policy, date format, then user name availability.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<DataResponse<UserResponse>>)> {
    let full_name = required(&input.full_name, "full_name")?;
    let user_name = required(&input.user_name, "user_name")?;
    // The password is validated as typed; surrounding spaces are a policy violation.
    let password = input
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::missing_field("password")))?;

    if let Some(violation) = validate_password(password) {
        return Err(AppError::Core(CoreError::Validation(violation.into())));
    }

    let moving_date = parse_moving_date(&input.moving_date)?;

    if UserRepo::user_name_taken(&state.pool, user_name).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already taken".into(),
        )));
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        user_name: user_name.to_string(),
        full_name: full_name.to_string(),
        password: password_hash,
        notes: present(&input.notes).map(str::to_string),
        moving_date,
    };

    let user = UserRepo::create(&state.pool, &create)
        .await
        .map_err(|err| match unique_violation(&err) {
            Some(USER_NAME_CONSTRAINT) => {
                AppError::Core(CoreError::Conflict("Username already taken".into()))
            }
            _ => AppError::Database(err),
        })?;

    tracing::info!(user_id = user.id, user_name = %user.user_name, "User registered");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, "/api/v1/users".to_string())],
        Json(DataResponse {
            data: user.to_public(),
        }),
    ))
}

/// GET /api/v1/users
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: row.to_public(),
    }))
}

/// PATCH /api/v1/users
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<UpdateProfileRequest>,
) -> AppResult<StatusCode> {
    let notes = present(&input.notes);
    if notes.is_none() && present(&input.moving_date).is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Request body must contain 'moving_date' or 'notes'".into(),
        )));
    }

    let update = UpdateProfile {
        notes: notes.map(str::to_string),
        moving_date: parse_moving_date(&input.moving_date)?,
    };

    let updated = UserRepo::update_profile(&state.pool, user.user_id, &update).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }));
    }

    tracing::info!(user_id = user.user_id, "Profile updated");
    Ok(StatusCode::NO_CONTENT)
}
