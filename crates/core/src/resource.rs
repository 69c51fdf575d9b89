//! Ownership-guarded CRUD over user-owned resources.
//!
//! Boxes, contacts and lists share one shape: a row owned by exactly one user,
//! a mandatory name field and a handful of optional writable fields. Each
//! entity describes itself through [`Resource`]; [`OwnedResourceService`]
//! applies the guard chain (locate, then authorize, then execute) once for all
//! of them on top of an injected [`OwnedStore`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::CoreError;
use crate::sanitize::PublicShape;
use crate::types::DbId;

/// Description of an owned entity type.
pub trait Resource: PublicShape + Clone + Send + Sync + 'static {
    /// Entity name used in error messages (e.g. `"Box"`).
    const ENTITY: &'static str;

    /// The mandatory, non-empty name field (e.g. `"box_name"`).
    const NAME_FIELD: &'static str;

    /// User-writable fields, in the order the store binds them.
    const FIELDS: &'static [&'static str];

    /// Creation payload.
    type Create: DeserializeOwned + Send + Sync + 'static;

    /// Partial update payload. Every field is optional.
    type Update: DeserializeOwned + Send + Sync + 'static;

    fn id(&self) -> DbId;

    fn owner_id(&self) -> DbId;

    /// The name field of a creation payload, if supplied.
    fn create_name(input: &Self::Create) -> Option<&str>;

    /// Whether an update payload carries at least one present field.
    fn has_changes(input: &Self::Update) -> bool;
}

/// Storage seam for one owned entity type.
///
/// `update_owned` and `delete_owned` must apply the owner condition in the
/// same statement as the mutation and report whether a row was affected.
#[async_trait]
pub trait OwnedStore<R: Resource>: Send + Sync {
    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<R>, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<R>, CoreError>;

    async fn insert(&self, owner_id: DbId, input: &R::Create) -> Result<R, CoreError>;

    async fn update_owned(
        &self,
        id: DbId,
        owner_id: DbId,
        input: &R::Update,
    ) -> Result<bool, CoreError>;

    async fn delete_owned(&self, id: DbId, owner_id: DbId) -> Result<bool, CoreError>;
}

/// Treat absent and blank strings the same way.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// CRUD for one owned entity type, scoped to the calling user.
pub struct OwnedResourceService<R: Resource> {
    store: Arc<dyn OwnedStore<R>>,
}

impl<R: Resource> Clone for OwnedResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: Resource> OwnedResourceService<R> {
    pub fn new(store: Arc<dyn OwnedStore<R>>) -> Self {
        Self { store }
    }

    /// All rows owned by `owner_id`, in store order. Empty if there are none.
    pub async fn list(&self, owner_id: DbId) -> Result<Vec<R>, CoreError> {
        self.store.list_by_owner(owner_id).await
    }

    /// Create a row owned by `owner_id`.
    pub async fn create(&self, owner_id: DbId, input: &R::Create) -> Result<R, CoreError> {
        let has_name = R::create_name(input).is_some_and(|name| !name.trim().is_empty());
        if !has_name {
            return Err(CoreError::missing_field(R::NAME_FIELD));
        }
        self.store.insert(owner_id, input).await
    }

    /// Fetch a single row, enforcing existence and then ownership.
    pub async fn get_one(&self, id: DbId, owner_id: DbId) -> Result<R, CoreError> {
        let row = self.store.find_by_id(id).await?.ok_or(CoreError::NotFound {
            entity: R::ENTITY,
            id,
        })?;

        if row.owner_id() != owner_id {
            return Err(forbidden::<R>());
        }

        Ok(row)
    }

    /// Apply a partial update to a row owned by `owner_id`.
    pub async fn update(
        &self,
        id: DbId,
        owner_id: DbId,
        input: &R::Update,
    ) -> Result<(), CoreError> {
        if !R::has_changes(input) {
            // The guard chain still decides first: a missing or foreign row
            // is reported as such even when the payload is empty.
            self.get_one(id, owner_id).await?;
            return Err(CoreError::Validation(format!(
                "Request body must contain one of {}",
                quoted_list(R::FIELDS)
            )));
        }

        if self.store.update_owned(id, owner_id, input).await? {
            return Ok(());
        }
        Err(self.classify_miss(id, owner_id).await)
    }

    /// Permanently remove a row owned by `owner_id`.
    pub async fn delete(&self, id: DbId, owner_id: DbId) -> Result<(), CoreError> {
        if self.store.delete_owned(id, owner_id).await? {
            return Ok(());
        }
        Err(self.classify_miss(id, owner_id).await)
    }

    /// Explain why a conditional mutation affected no rows.
    async fn classify_miss(&self, id: DbId, owner_id: DbId) -> CoreError {
        match self.store.find_by_id(id).await {
            Ok(Some(row)) if row.owner_id() != owner_id => forbidden::<R>(),
            Ok(_) => CoreError::NotFound {
                entity: R::ENTITY,
                id,
            },
            Err(err) => err,
        }
    }
}

fn forbidden<R: Resource>() -> CoreError {
    CoreError::Forbidden(format!("{} belongs to a different user", R::ENTITY))
}

fn quoted_list(fields: &[&str]) -> String {
    let quoted: Vec<String> = fields.iter().map(|f| format!("'{f}'")).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, or {last}", rest.join(", ")),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}
