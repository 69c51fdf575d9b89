//! Generic handlers for the owned collections (`/boxes`, `/contacts`, `/lists`).
//!
//! Each handler is instantiated once per entity; the entity type selects the
//! resource service from [`AppState`] through [`OwnedCollection`].

use axum::extract::{Path, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::Json;
use movingday_core::resource::{OwnedResourceService, Resource};
use movingday_core::sanitize::{to_public_all, PublicShape};
use movingday_core::types::DbId;
use movingday_db::models::checklist::Checklist;
use movingday_db::models::contact::Contact;
use movingday_db::models::moving_box::MovingBox;

use crate::error::AppResult;
use crate::extract::{from_value, AppJson};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// An owned entity exposed as a collection under `/api/v1/{COLLECTION}`.
pub trait OwnedCollection: Resource {
    /// Path segment of the collection.
    const COLLECTION: &'static str;

    fn service(state: &AppState) -> &OwnedResourceService<Self>;
}

impl OwnedCollection for MovingBox {
    const COLLECTION: &'static str = "boxes";

    fn service(state: &AppState) -> &OwnedResourceService<Self> {
        &state.boxes
    }
}

impl OwnedCollection for Contact {
    const COLLECTION: &'static str = "contacts";

    fn service(state: &AppState) -> &OwnedResourceService<Self> {
        &state.contacts
    }
}

impl OwnedCollection for Checklist {
    const COLLECTION: &'static str = "lists";

    fn service(state: &AppState) -> &OwnedResourceService<Self> {
        &state.lists
    }
}

type Created<T> = (StatusCode, [(HeaderName, String); 1], Json<DataResponse<T>>);

/// GET /api/v1/{collection}
pub async fn list<R: OwnedCollection>(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<R::Public>>>> {
    let rows = R::service(&state).list(user.user_id).await?;
    Ok(Json(DataResponse {
        data: to_public_all(&rows),
    }))
}

/// POST /api/v1/{collection}
pub async fn create<R: OwnedCollection>(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<R::Create>,
) -> AppResult<Created<R::Public>> {
    let row = R::service(&state).create(user.user_id, &input).await?;

    tracing::info!(
        entity = R::ENTITY,
        id = row.id(),
        user_id = user.user_id,
        user_name = %user.user_name,
        "Owned resource created",
    );

    let location = format!("/api/v1/{}/{}", R::COLLECTION, row.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(DataResponse {
            data: row.to_public(),
        }),
    ))
}

/// GET /api/v1/{collection}/{id}
pub async fn get_one<R: OwnedCollection>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<R::Public>>> {
    let row = R::service(&state).get_one(id, user.user_id).await?;
    Ok(Json(DataResponse {
        data: row.to_public(),
    }))
}

/// PATCH /api/v1/{collection}/{id}
pub async fn update<R: OwnedCollection>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<serde_json::Value>,
) -> AppResult<StatusCode> {
    let service = R::service(&state);

    // The payload is typed only after the row is located and authorized, so a
    // missing or foreign row is reported as such whatever the body holds.
    let input: R::Update = match from_value(body) {
        Ok(input) => input,
        Err(err) => {
            service.get_one(id, user.user_id).await?;
            return Err(err.into());
        }
    };

    service.update(id, user.user_id, &input).await?;

    tracing::info!(
        entity = R::ENTITY,
        id,
        user_id = user.user_id,
        user_name = %user.user_name,
        "Owned resource updated",
    );
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/{collection}/{id}
pub async fn delete<R: OwnedCollection>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    R::service(&state).delete(id, user.user_id).await?;

    tracing::info!(
        entity = R::ENTITY,
        id,
        user_id = user.user_id,
        user_name = %user.user_name,
        "Owned resource deleted",
    );
    Ok(StatusCode::NO_CONTENT)
}
