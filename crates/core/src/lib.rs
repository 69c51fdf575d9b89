//! Domain layer for the Moving Day API.
//!
//! Everything here is free of database and HTTP dependencies so the ownership
//! rules can be exercised against any storage backend.

pub mod error;
pub mod password;
pub mod resource;
pub mod sanitize;
pub mod types;
