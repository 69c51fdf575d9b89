//! Contact model, payload and public shape.

use movingday_core::resource::{present, Resource};
use movingday_core::sanitize::{sanitize, sanitize_opt, PublicShape};
use movingday_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::repositories::owned_repo::{OwnedTable, PgQueryAs};

/// A row from the `movingday_contacts` table.
#[derive(Debug, Clone, FromRow)]
pub struct Contact {
    pub id: DbId,
    pub contact_name: String,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_notes: Option<String>,
    pub date_created: Timestamp,
    pub user_id: DbId,
}

/// Writable contact fields, used for both creation and partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactFields {
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_notes: Option<String>,
}

/// Public contact representation.
#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub id: DbId,
    pub contact_name: String,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_notes: Option<String>,
    pub date_created: Timestamp,
    pub user_id: DbId,
}

impl PublicShape for Contact {
    type Public = ContactResponse;

    fn to_public(&self) -> ContactResponse {
        ContactResponse {
            id: self.id,
            contact_name: sanitize(&self.contact_name),
            contact_phone: sanitize_opt(self.contact_phone.as_deref()),
            contact_email: sanitize_opt(self.contact_email.as_deref()),
            contact_notes: sanitize_opt(self.contact_notes.as_deref()),
            date_created: self.date_created,
            user_id: self.user_id,
        }
    }
}

impl Resource for Contact {
    const ENTITY: &'static str = "Contact";
    const NAME_FIELD: &'static str = "contact_name";
    const FIELDS: &'static [&'static str] = &[
        "contact_name",
        "contact_phone",
        "contact_email",
        "contact_notes",
    ];

    type Create = ContactFields;
    type Update = ContactFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.user_id
    }

    fn create_name(input: &ContactFields) -> Option<&str> {
        input.contact_name.as_deref()
    }

    fn has_changes(input: &ContactFields) -> bool {
        [
            &input.contact_name,
            &input.contact_phone,
            &input.contact_email,
            &input.contact_notes,
        ]
        .into_iter()
        .any(|field| present(field).is_some())
    }
}

impl OwnedTable for Contact {
    const TABLE: &'static str = "movingday_contacts";
    const COLUMNS: &'static str =
        "id, contact_name, contact_phone, contact_email, contact_notes, date_created, user_id";

    fn bind_create<'q>(query: PgQueryAs<'q, Self>, input: &'q ContactFields) -> PgQueryAs<'q, Self> {
        bind_fields(query, input)
    }

    fn bind_update<'q>(query: PgQueryAs<'q, Self>, input: &'q ContactFields) -> PgQueryAs<'q, Self> {
        bind_fields(query, input)
    }
}

fn bind_fields<'q>(
    query: PgQueryAs<'q, Contact>,
    input: &'q ContactFields,
) -> PgQueryAs<'q, Contact> {
    query
        .bind(present(&input.contact_name))
        .bind(present(&input.contact_phone))
        .bind(present(&input.contact_email))
        .bind(present(&input.contact_notes))
}
