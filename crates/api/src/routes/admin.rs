//! Route definitions for the `/admin` resource (superuser only).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin, stations};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /users                     -> list users
/// POST /users                     -> create user
/// GET  /users/{id}                -> get user
/// PUT  /users/{id}                -> update user
/// DELETE /users/{id}              -> soft-deactivate user
/// POST /users/{id}/reset-password -> reset password
/// GET  /users/{id}/stations       -> station assignments
/// PUT  /users/{id}/stations       -> replace station assignments
///
/// POST /stations                  -> create station
/// PUT  /stations/{id}             -> update station
/// DELETE /stations/{id}           -> delete station (refused while it owns trucks)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::deactivate_user),
        )
        .route("/users/{id}/reset-password", post(admin::reset_password))
        .route(
            "/users/{id}/stations",
            get(admin::get_user_stations).put(admin::replace_user_stations),
        )
        .route("/stations", post(stations::create_station))
        .route(
            "/stations/{id}",
            put(stations::update_station).delete(stations::delete_station),
        )
}
