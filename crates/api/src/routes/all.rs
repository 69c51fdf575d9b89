use axum::routing::get;
use axum::Router;

use crate::handlers::all;
use crate::state::AppState;

/// Routes mounted at `/all`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(all::get_all))
}
