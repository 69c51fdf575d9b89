pub mod all;
pub mod auth;
pub mod owned;
pub mod users;
