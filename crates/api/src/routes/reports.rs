//! Route definitions for the `/reports` resource (station-scoped).

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
pub fn router() -> Router<AppState> {
    Router::new().route("/missing-items", get(reports::missing_items))
}
