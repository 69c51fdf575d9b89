//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- token issuance, verification and bearer resolution.

pub mod jwt;
pub mod password;
