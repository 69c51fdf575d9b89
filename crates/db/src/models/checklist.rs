//! Checklist ("list") model, payload and public shape.
//!
//! A checklist holds an item set mapping each label to its done flag, stored
//! as `JSONB`.

use std::collections::BTreeMap;

use movingday_core::resource::{present, Resource};
use movingday_core::sanitize::{sanitize, sanitize_keys, PublicShape};
use movingday_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::repositories::owned_repo::{OwnedTable, PgQueryAs};

/// Label -> done flag.
pub type ChecklistItems = BTreeMap<String, bool>;

/// A row from the `movingday_lists` table.
#[derive(Debug, Clone, FromRow)]
pub struct Checklist {
    pub id: DbId,
    pub list_name: String,
    pub list_items: Option<Json<ChecklistItems>>,
    pub date_created: Timestamp,
    pub user_id: DbId,
}

/// Writable checklist fields, used for both creation and partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChecklistFields {
    pub list_name: Option<String>,
    pub list_items: Option<ChecklistItems>,
}

/// Public checklist representation.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistResponse {
    pub id: DbId,
    pub list_name: String,
    pub list_items: ChecklistItems,
    pub date_created: Timestamp,
    pub user_id: DbId,
}

impl PublicShape for Checklist {
    type Public = ChecklistResponse;

    fn to_public(&self) -> ChecklistResponse {
        ChecklistResponse {
            id: self.id,
            list_name: sanitize(&self.list_name),
            list_items: sanitize_keys(self.list_items.as_ref().map(|items| &items.0)),
            date_created: self.date_created,
            user_id: self.user_id,
        }
    }
}

impl Resource for Checklist {
    const ENTITY: &'static str = "List";
    const NAME_FIELD: &'static str = "list_name";
    const FIELDS: &'static [&'static str] = &["list_name", "list_items"];

    type Create = ChecklistFields;
    type Update = ChecklistFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.user_id
    }

    fn create_name(input: &ChecklistFields) -> Option<&str> {
        input.list_name.as_deref()
    }

    fn has_changes(input: &ChecklistFields) -> bool {
        present(&input.list_name).is_some() || input.list_items.is_some()
    }
}

impl OwnedTable for Checklist {
    const TABLE: &'static str = "movingday_lists";
    const COLUMNS: &'static str = "id, list_name, list_items, date_created, user_id";

    fn bind_create<'q>(
        query: PgQueryAs<'q, Self>,
        input: &'q ChecklistFields,
    ) -> PgQueryAs<'q, Self> {
        bind_fields(query, input)
    }

    fn bind_update<'q>(
        query: PgQueryAs<'q, Self>,
        input: &'q ChecklistFields,
    ) -> PgQueryAs<'q, Self> {
        bind_fields(query, input)
    }
}

fn bind_fields<'q>(
    query: PgQueryAs<'q, Checklist>,
    input: &'q ChecklistFields,
) -> PgQueryAs<'q, Checklist> {
    query
        .bind(present(&input.list_name))
        .bind(input.list_items.as_ref().map(Json))
}
