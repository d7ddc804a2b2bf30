//! Reporting queries over the current station.

use axum::extract::State;
use axum::Json;
use truckchecks_db::models::check::MissingItem;
use truckchecks_db::repositories::CheckRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStation;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reports/missing-items
///
/// Items recorded missing in the latest check of each truck of the current
/// station. Trucks that have never been checked contribute nothing.
pub async fn missing_items(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
) -> AppResult<Json<DataResponse<Vec<MissingItem>>>> {
    let rows = CheckRepo::missing_items_for_station(&state.pool, station.id).await?;
    Ok(Json(DataResponse { data: rows }))
}
