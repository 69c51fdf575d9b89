pub mod all;
pub mod auth;
pub mod health;
pub mod owned;
pub mod users;

use axum::Router;
use movingday_db::models::checklist::Checklist;
use movingday_db::models::contact::Contact;
use movingday_db::models::moving_box::MovingBox;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                 login (public)
///
/// /users                      register (public), own profile, update profile
///
/// /boxes                      list, create
/// /boxes/{id}                 get, update, delete
/// /contacts                   list, create
/// /contacts/{id}              get, update, delete
/// /lists                      list, create
/// /lists/{id}                 get, update, delete
///
/// /all                        profile plus every owned row
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .merge(owned::router::<MovingBox>())
        .merge(owned::router::<Contact>())
        .merge(owned::router::<Checklist>())
        .nest("/all", all::router())
}
