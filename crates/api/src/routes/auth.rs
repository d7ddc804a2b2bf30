//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login         -> credential login (public)
/// POST /legacy-login  -> shared-password login (public)
/// POST /logout        -> logout
/// GET  /me            -> current identity (requires auth)
/// GET  /stations      -> accessible stations (requires auth)
/// GET  /station       -> resolve current station (requires auth)
/// PUT  /station       -> select current station (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/legacy-login", post(auth::legacy_login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/stations", get(auth::my_stations))
        .route("/station", get(auth::get_station).put(auth::set_station))
}
