//! Repository for the `movingday_users` table.

use movingday_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::user::{CreateUser, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_name, full_name, password, notes, moving_date, date_created";

/// Provides data access for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate `user_name` fails with a unique violation on
    /// `uq_movingday_users_user_name`.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO movingday_users (user_name, full_name, password, notes, moving_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.user_name)
            .bind(&input.full_name)
            .bind(&input.password)
            .bind(&input.notes)
            .bind(input.moving_date)
            .fetch_one(executor)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movingday_users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a user by user name (case-sensitive).
    pub async fn find_by_user_name<'e>(
        executor: impl PgExecutor<'e>,
        user_name: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movingday_users WHERE user_name = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(user_name)
            .fetch_optional(executor)
            .await
    }

    /// Whether a user with this user name already exists.
    pub async fn user_name_taken<'e>(
        executor: impl PgExecutor<'e>,
        user_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM movingday_users WHERE user_name = $1)")
                .bind(user_name)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    /// Apply a profile update. Only non-`None` fields are changed.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn update_profile<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE movingday_users SET
                notes = COALESCE($2, notes),
                moving_date = COALESCE($3, moving_date)
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.notes)
        .bind(input.moving_date)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
