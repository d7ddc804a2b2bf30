//! Route definitions for directly-addressed items (station-scoped).

use axum::routing::put;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// PUT  /{id}    -> update item
/// DELETE /{id}  -> delete item
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(items::update_item).delete(items::delete_item))
}
