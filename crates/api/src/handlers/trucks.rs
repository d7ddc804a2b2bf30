//! Handlers for the `/trucks` resource.
//!
//! All routes are scoped to the caller's current station via
//! [`RequireStation`]; a truck id from another station is indistinguishable
//! from a missing one (404).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use truckchecks_core::error::CoreError;
use truckchecks_core::types::DbId;
use truckchecks_db::models::truck::{CreateTruck, Truck, UpdateTruck};
use truckchecks_db::repositories::TruckRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStation;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/trucks
///
/// List the current station's trucks, ordered by name.
pub async fn list_trucks(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
) -> AppResult<Json<DataResponse<Vec<Truck>>>> {
    let trucks = TruckRepo::list_for_station(&state.pool, station.id).await?;
    Ok(Json(DataResponse { data: trucks }))
}

/// POST /api/v1/trucks
///
/// Create a truck in the current station with 201 Created.
pub async fn create_truck(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Json(input): Json<CreateTruck>,
) -> AppResult<(StatusCode, Json<Truck>)> {
    let truck = TruckRepo::create(&state.pool, station.id, &input).await?;
    tracing::info!(truck_id = truck.id, station_id = station.id, "truck created");
    Ok((StatusCode::CREATED, Json(truck)))
}

/// GET /api/v1/trucks/{id}
pub async fn get_truck(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(id): Path<DbId>,
) -> AppResult<Json<Truck>> {
    let truck = TruckRepo::find_for_station(&state.pool, id, station.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Truck", id }))?;
    Ok(Json(truck))
}

/// PUT /api/v1/trucks/{id}
pub async fn update_truck(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTruck>,
) -> AppResult<Json<Truck>> {
    let truck = TruckRepo::update_for_station(&state.pool, id, station.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Truck", id }))?;
    Ok(Json(truck))
}

/// DELETE /api/v1/trucks/{id}
///
/// Delete a truck and (by cascade) its lockers, items, and checks.
/// Returns 204 No Content.
pub async fn delete_truck(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TruckRepo::delete_for_station(&state.pool, id, station.id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Truck", id }));
    }
    tracing::info!(truck_id = id, station_id = station.id, "truck deleted");
    Ok(StatusCode::NO_CONTENT)
}
