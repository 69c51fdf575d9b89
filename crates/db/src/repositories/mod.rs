//! Repository layer.
//!
//! [`UserRepo`] is a zero-sized struct providing async methods that accept an
//! executor as the first argument. Owned tables share the generic
//! [`PgOwnedStore`].

pub mod owned_repo;
pub mod user_repo;

pub use owned_repo::{OwnedTable, PgOwnedStore};
pub use user_repo::UserRepo;
