//! User entity model and DTOs.

use movingday_core::sanitize::{sanitize, sanitize_opt, PublicShape};
use movingday_core::types::{CalendarDate, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `movingday_users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] via [`PublicShape`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub user_name: String,
    pub full_name: String,
    pub password: String,
    pub notes: Option<String>,
    pub moving_date: Option<CalendarDate>,
    pub date_created: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub user_name: String,
    pub full_name: String,
    pub notes: Option<String>,
    pub moving_date: Option<CalendarDate>,
    pub date_created: Timestamp,
}

impl PublicShape for User {
    type Public = UserResponse;

    fn to_public(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            user_name: sanitize(&self.user_name),
            full_name: sanitize(&self.full_name),
            notes: sanitize_opt(self.notes.as_deref()),
            moving_date: self.moving_date,
            date_created: self.date_created,
        }
    }
}

/// DTO for inserting a new user. `password` is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub user_name: String,
    pub full_name: String,
    pub password: String,
    pub notes: Option<String>,
    pub moving_date: Option<CalendarDate>,
}

/// Self-service profile changes. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub notes: Option<String>,
    pub moving_date: Option<CalendarDate>,
}
