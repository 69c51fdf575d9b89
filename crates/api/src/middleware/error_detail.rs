//! Environment-aware exposure of internal error detail.
//!
//! [`AppError`](crate::error::AppError) always answers a 500 with a generic
//! message and stashes the real cause in an [`InternalErrorDetail`] extension.
//! Outside production this middleware rewrites such responses to carry the
//! cause in a `detail` field.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::config::AppEnv;
use crate::error::{InternalErrorDetail, INTERNAL_MESSAGE};

pub async fn attach_internal_detail(
    State(app_env): State<AppEnv>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if app_env.is_production() {
        return response;
    }

    let Some(InternalErrorDetail(detail)) =
        response.extensions().get::<InternalErrorDetail>().cloned()
    else {
        return response;
    };

    let body = json!({
        "error": INTERNAL_MESSAGE,
        "code": "INTERNAL_ERROR",
        "detail": detail,
    });
    (response.status(), axum::Json(body)).into_response()
}
