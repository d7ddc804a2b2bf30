//! Handlers for the `/admin/stations` resource (station management).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use truckchecks_core::error::CoreError;
use truckchecks_core::types::DbId;
use truckchecks_db::models::station::{CreateStation, Station, UpdateStation};
use truckchecks_db::repositories::StationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireSuperuser;
use crate::state::AppState;

/// POST /api/v1/admin/stations
///
/// Create a new station with 201 Created. Duplicate names are rejected by
/// the `uq_stations_name` constraint (409).
pub async fn create_station(
    State(state): State<AppState>,
    RequireSuperuser(_admin): RequireSuperuser,
    Json(input): Json<CreateStation>,
) -> AppResult<(StatusCode, Json<Station>)> {
    let station = StationRepo::create(&state.pool, &input).await?;
    tracing::info!(station_id = station.id, "station created");
    Ok((StatusCode::CREATED, Json(station)))
}

/// PUT /api/v1/admin/stations/{id}
///
/// Update a station's name or description.
pub async fn update_station(
    State(state): State<AppState>,
    RequireSuperuser(_admin): RequireSuperuser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStation>,
) -> AppResult<Json<Station>> {
    let station = StationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Station",
            id,
        }))?;

    Ok(Json(station))
}

/// DELETE /api/v1/admin/stations/{id}
///
/// Delete a station. Refused with 409 while the station owns trucks.
/// Returns 204 No Content.
pub async fn delete_station(
    State(state): State<AppState>,
    RequireSuperuser(_admin): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let trucks = StationRepo::truck_count(&state.pool, id).await?;
    if trucks > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Station still owns {trucks} truck(s)"
        ))));
    }

    let deleted = StationRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Station",
            id,
        }));
    }
    tracing::info!(station_id = id, "station deleted");
    Ok(StatusCode::NO_CONTENT)
}
