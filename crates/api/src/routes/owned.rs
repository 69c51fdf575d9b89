//! Route definitions shared by every owned collection.

use axum::routing::get;
use axum::Router;

use crate::handlers::owned::{self, OwnedCollection};
use crate::state::AppState;

/// Routes for one owned collection, mounted at `/{R::COLLECTION}`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// GET    /{id}        -> get_one
/// PATCH  /{id}        -> update
/// DELETE /{id}        -> delete
/// ```
pub fn router<R: OwnedCollection>() -> Router<AppState> {
    let routes = Router::new()
        .route("/", get(owned::list::<R>).post(owned::create::<R>))
        .route(
            "/{id}",
            get(owned::get_one::<R>)
                .patch(owned::update::<R>)
                .delete(owned::delete::<R>),
        );

    Router::new().nest(&format!("/{}", R::COLLECTION), routes)
}
