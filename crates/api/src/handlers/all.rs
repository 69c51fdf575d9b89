//! Handler for `GET /all`.

use axum::extract::State;
use axum::Json;
use movingday_core::sanitize::PublicShape;

use crate::aggregate::OverviewResponse;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/all
///
/// The caller's profile plus every box, contact and list they own.
pub async fn get_all(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<OverviewResponse>>> {
    let overview = state.aggregator().get_all(user.user_id).await?;
    Ok(Json(DataResponse {
        data: overview.to_public(),
    }))
}
