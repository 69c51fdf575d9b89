//! Request extractors and response middleware.
//!
//! - [`auth::AuthUser`] -- resolves the caller from a Bearer token.
//! - [`error_detail::attach_internal_detail`] -- exposes internal error detail
//!   outside production.

pub mod auth;
pub mod error_detail;
