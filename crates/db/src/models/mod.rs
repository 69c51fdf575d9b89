//! Row models, payload DTOs and public response shapes.
//!
//! Rows map one-to-one onto table columns. Responses are produced only through
//! [`movingday_core::sanitize::PublicShape`], never by serializing a row.

pub mod checklist;
pub mod contact;
pub mod moving_box;
pub mod user;
