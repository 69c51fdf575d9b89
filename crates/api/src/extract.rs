//! JSON body extraction reported in the API's `{error, code}` format.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use movingday_core::error::CoreError;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Like [`Json`], but a body that is missing, malformed, or of the wrong shape
/// is rejected as a 400 validation error instead of axum's plain-text 4xx.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "Request body rejected");
        AppError::BadRequest(rejection.body_text())
    }
}

/// Convert an already-parsed JSON body into a typed payload.
pub fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, CoreError> {
    serde_json::from_value(value)
        .map_err(|e| CoreError::Validation(format!("Invalid request body: {e}")))
}
