//! Generic Postgres storage for user-owned tables.
//!
//! Boxes, contacts and lists all live in tables of the same shape: `id`, the
//! entity's writable columns, `date_created` and a `user_id` owner column.
//! [`PgOwnedStore`] builds its SQL from the entity's [`OwnedTable`]
//! description, so one implementation serves all three.

use std::marker::PhantomData;

use async_trait::async_trait;
use movingday_core::error::CoreError;
use movingday_core::resource::{OwnedStore, Resource};
use movingday_core::types::DbId;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgExecutor, PgPool, Postgres};

/// A typed Postgres query returning rows of `O`.
pub type PgQueryAs<'q, O> = QueryAs<'q, Postgres, O, PgArguments>;

/// Table-level description of an owned entity.
pub trait OwnedTable: Resource + for<'r> FromRow<'r, PgRow> + Unpin {
    /// Table name.
    const TABLE: &'static str;

    /// Full column list returned by every query.
    const COLUMNS: &'static str;

    /// Bind the creation payload in [`Resource::FIELDS`] order.
    fn bind_create<'q>(query: PgQueryAs<'q, Self>, input: &'q Self::Create)
        -> PgQueryAs<'q, Self>;

    /// Bind the update payload in [`Resource::FIELDS`] order. Absent fields
    /// must bind as `NULL` so the stored value is kept.
    fn bind_update<'q>(query: PgQueryAs<'q, Self>, input: &'q Self::Update)
        -> PgQueryAs<'q, Self>;
}

/// `INSERT INTO t (user_id, f1, .., fn) VALUES ($1, $2, .., $n+1) RETURNING ..`
fn insert_sql<R: OwnedTable>() -> String {
    let placeholders: Vec<String> = (0..R::FIELDS.len())
        .map(|i| format!("${}", i + 2))
        .collect();
    format!(
        "INSERT INTO {} (user_id, {}) VALUES ($1, {}) RETURNING {}",
        R::TABLE,
        R::FIELDS.join(", "),
        placeholders.join(", "),
        R::COLUMNS
    )
}

/// Conditional partial update: `$1` is the row id, `$2` the owner, and each
/// field keeps its stored value when bound as `NULL`.
fn update_sql<R: OwnedTable>() -> String {
    let assignments: Vec<String> = R::FIELDS
        .iter()
        .enumerate()
        .map(|(i, field)| format!("{field} = COALESCE(${}, {field})", i + 3))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = $1 AND user_id = $2 RETURNING {}",
        R::TABLE,
        assignments.join(", "),
        R::COLUMNS
    )
}

/// Insert a row owned by `owner_id` through any executor (pool or transaction).
pub async fn insert_owned<'e, R, E>(
    executor: E,
    owner_id: DbId,
    input: &R::Create,
) -> Result<R, sqlx::Error>
where
    R: OwnedTable,
    E: PgExecutor<'e>,
{
    let query = insert_sql::<R>();
    R::bind_create(sqlx::query_as::<_, R>(&query).bind(owner_id), input)
        .fetch_one(executor)
        .await
}

fn store_error<R: Resource>(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("{} store: {err}", R::ENTITY))
}

/// [`OwnedStore`] backed by a Postgres pool.
pub struct PgOwnedStore<R> {
    pool: PgPool,
    _entity: PhantomData<fn() -> R>,
}

impl<R> PgOwnedStore<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<R: OwnedTable> OwnedStore<R> for PgOwnedStore<R> {
    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<R>, CoreError> {
        let query = format!(
            "SELECT {} FROM {} WHERE user_id = $1 ORDER BY id",
            R::COLUMNS,
            R::TABLE
        );
        sqlx::query_as::<_, R>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error::<R>)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<R>, CoreError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", R::COLUMNS, R::TABLE);
        sqlx::query_as::<_, R>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error::<R>)
    }

    async fn insert(&self, owner_id: DbId, input: &R::Create) -> Result<R, CoreError> {
        insert_owned::<R, _>(&self.pool, owner_id, input)
            .await
            .map_err(store_error::<R>)
    }

    async fn update_owned(
        &self,
        id: DbId,
        owner_id: DbId,
        input: &R::Update,
    ) -> Result<bool, CoreError> {
        let query = update_sql::<R>();
        let updated = R::bind_update(
            sqlx::query_as::<_, R>(&query).bind(id).bind(owner_id),
            input,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error::<R>)?;
        Ok(updated.is_some())
    }

    async fn delete_owned(&self, id: DbId, owner_id: DbId) -> Result<bool, CoreError> {
        let query = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", R::TABLE);
        let result = sqlx::query(&query)
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(store_error::<R>)?;
        Ok(result.rows_affected() > 0)
    }
}
