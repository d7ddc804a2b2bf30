//! Route definitions for the `/trucks` resource (station-scoped).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{checks, lockers, trucks};
use crate::state::AppState;

/// Routes mounted at `/trucks`.
///
/// ```text
/// GET  /                          -> list trucks of the current station
/// POST /                          -> create truck
/// GET  /{truck_id}                -> get truck
/// PUT  /{truck_id}                -> update truck
/// DELETE /{truck_id}              -> delete truck
/// GET  /{truck_id}/lockers        -> list lockers
/// POST /{truck_id}/lockers        -> create locker
/// POST /{truck_id}/checks         -> record a check
/// GET  /{truck_id}/checks/latest  -> latest check with item presence
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trucks::list_trucks).post(trucks::create_truck))
        .route(
            "/{truck_id}",
            get(trucks::get_truck)
                .put(trucks::update_truck)
                .delete(trucks::delete_truck),
        )
        .route(
            "/{truck_id}/lockers",
            get(lockers::list_lockers).post(lockers::create_locker),
        )
        .route("/{truck_id}/checks", post(checks::record_check))
        .route("/{truck_id}/checks/latest", get(checks::latest_check))
}
