//! Route definitions for directly-addressed lockers (station-scoped).

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{items, lockers};
use crate::state::AppState;

/// Routes mounted at `/lockers`.
///
/// ```text
/// PUT  /{locker_id}         -> update locker
/// DELETE /{locker_id}       -> delete locker
/// GET  /{locker_id}/items   -> list items
/// POST /{locker_id}/items   -> create item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{locker_id}",
            put(lockers::update_locker).delete(lockers::delete_locker),
        )
        .route(
            "/{locker_id}/items",
            get(items::list_items).post(items::create_item),
        )
}
