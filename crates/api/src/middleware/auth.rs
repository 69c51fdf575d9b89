//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use movingday_core::types::DbId;

use crate::auth::jwt::AuthError;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, resolved from the `Authorization` header.
///
/// Every failure is rejected with the same 401 body; the specific cause is
/// only logged.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub user_name: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        match state.tokens.resolve(&state.pool, header).await {
            Ok(user) => {
                tracing::debug!(
                    user_id = user.id,
                    user_name = %user.user_name,
                    path = %parts.uri.path(),
                    "Request authenticated",
                );
                Ok(AuthUser {
                    user_id: user.id,
                    user_name: user.user_name,
                })
            }
            Err(err) => {
                match &err {
                    AuthError::Store(_) => tracing::warn!(error = %err, "Token resolution failed"),
                    _ => tracing::debug!(reason = %err, path = %parts.uri.path(), "Rejected request"),
                }
                Err(err.into())
            }
        }
    }
}
