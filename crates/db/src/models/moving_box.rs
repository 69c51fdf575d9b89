//! Moving box model, payload and public shape.

use movingday_core::resource::{present, Resource};
use movingday_core::sanitize::{sanitize, sanitize_list, sanitize_opt, PublicShape};
use movingday_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::repositories::owned_repo::{OwnedTable, PgQueryAs};

/// A row from the `movingday_boxes` table.
#[derive(Debug, Clone, FromRow)]
pub struct MovingBox {
    pub id: DbId,
    pub box_name: String,
    pub coming_from: Option<String>,
    pub going_to: Option<String>,
    pub getting_there: Option<String>,
    pub color_code: Option<String>,
    pub box_notes: Option<String>,
    pub inventory: Option<Vec<String>>,
    pub date_created: Timestamp,
    pub user_id: DbId,
}

/// Writable box fields, used for both creation and partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovingBoxFields {
    pub box_name: Option<String>,
    pub coming_from: Option<String>,
    pub going_to: Option<String>,
    pub getting_there: Option<String>,
    pub color_code: Option<String>,
    pub box_notes: Option<String>,
    pub inventory: Option<Vec<String>>,
}

/// Public box representation.
#[derive(Debug, Clone, Serialize)]
pub struct MovingBoxResponse {
    pub id: DbId,
    pub box_name: String,
    pub coming_from: Option<String>,
    pub going_to: Option<String>,
    pub getting_there: Option<String>,
    pub color_code: Option<String>,
    pub box_notes: Option<String>,
    pub inventory: Vec<String>,
    pub date_created: Timestamp,
    pub user_id: DbId,
}

impl PublicShape for MovingBox {
    type Public = MovingBoxResponse;

    fn to_public(&self) -> MovingBoxResponse {
        MovingBoxResponse {
            id: self.id,
            box_name: sanitize(&self.box_name),
            coming_from: sanitize_opt(self.coming_from.as_deref()),
            going_to: sanitize_opt(self.going_to.as_deref()),
            getting_there: sanitize_opt(self.getting_there.as_deref()),
            color_code: sanitize_opt(self.color_code.as_deref()),
            box_notes: sanitize_opt(self.box_notes.as_deref()),
            inventory: sanitize_list(self.inventory.as_deref()),
            date_created: self.date_created,
            user_id: self.user_id,
        }
    }
}

impl Resource for MovingBox {
    const ENTITY: &'static str = "Box";
    const NAME_FIELD: &'static str = "box_name";
    const FIELDS: &'static [&'static str] = &[
        "box_name",
        "coming_from",
        "going_to",
        "getting_there",
        "color_code",
        "box_notes",
        "inventory",
    ];

    type Create = MovingBoxFields;
    type Update = MovingBoxFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.user_id
    }

    fn create_name(input: &MovingBoxFields) -> Option<&str> {
        input.box_name.as_deref()
    }

    fn has_changes(input: &MovingBoxFields) -> bool {
        [
            &input.box_name,
            &input.coming_from,
            &input.going_to,
            &input.getting_there,
            &input.color_code,
            &input.box_notes,
        ]
        .into_iter()
        .any(|field| present(field).is_some())
            || input.inventory.is_some()
    }
}

impl OwnedTable for MovingBox {
    const TABLE: &'static str = "movingday_boxes";
    const COLUMNS: &'static str = "id, box_name, coming_from, going_to, getting_there, \
                                   color_code, box_notes, inventory, date_created, user_id";

    fn bind_create<'q>(query: PgQueryAs<'q, Self>, input: &'q MovingBoxFields) -> PgQueryAs<'q, Self> {
        bind_fields(query, input)
    }

    fn bind_update<'q>(query: PgQueryAs<'q, Self>, input: &'q MovingBoxFields) -> PgQueryAs<'q, Self> {
        bind_fields(query, input)
    }
}

/// Bind in [`Resource::FIELDS`] order. Blank strings bind as `NULL`.
fn bind_fields<'q>(
    query: PgQueryAs<'q, MovingBox>,
    input: &'q MovingBoxFields,
) -> PgQueryAs<'q, MovingBox> {
    query
        .bind(present(&input.box_name))
        .bind(present(&input.coming_from))
        .bind(present(&input.going_to))
        .bind(present(&input.getting_there))
        .bind(present(&input.color_code))
        .bind(present(&input.box_notes))
        .bind(&input.inventory)
}
