use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST  /    -> register (public)
/// GET   /    -> get_profile
/// PATCH /    -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(users::get_profile)
            .post(users::register)
            .patch(users::update_profile),
    )
}
