pub mod admin;
pub mod auth;
pub mod health;
pub mod items;
pub mod lockers;
pub mod reports;
pub mod trucks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     credential login (public)
/// /auth/legacy-login              shared-password login (public)
/// /auth/logout                    logout
/// /auth/me                        current identity
/// /auth/stations                  accessible stations
/// /auth/station                   resolve / select current station
///
/// /admin/users...                 user + assignment management (superuser)
/// /admin/stations...              station management (superuser)
///
/// /trucks...                      inventory of the current station
/// /lockers...                     lockers and their items
/// /items...                       directly-addressed items
/// /reports/missing-items          missing-item digest query
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/trucks", trucks::router())
        .nest("/lockers", lockers::router())
        .nest("/items", items::router())
        .nest("/reports", reports::router())
}
