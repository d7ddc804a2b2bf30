//! Handlers for lockers, nested under trucks for listing/creation and
//! addressed directly for updates/deletion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use truckchecks_core::error::CoreError;
use truckchecks_core::types::DbId;
use truckchecks_db::models::locker::{CreateLocker, Locker, UpdateLocker};
use truckchecks_db::repositories::{LockerRepo, TruckRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStation;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/trucks/{truck_id}/lockers
pub async fn list_lockers(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(truck_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Locker>>>> {
    if TruckRepo::find_for_station(&state.pool, truck_id, station.id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Truck",
            id: truck_id,
        }));
    }

    let lockers = LockerRepo::list_for_truck(&state.pool, truck_id).await?;
    Ok(Json(DataResponse { data: lockers }))
}

/// POST /api/v1/trucks/{truck_id}/lockers
pub async fn create_locker(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(truck_id): Path<DbId>,
    Json(input): Json<CreateLocker>,
) -> AppResult<(StatusCode, Json<Locker>)> {
    if TruckRepo::find_for_station(&state.pool, truck_id, station.id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Truck",
            id: truck_id,
        }));
    }

    let locker = LockerRepo::create(&state.pool, truck_id, &input).await?;
    tracing::info!(locker_id = locker.id, truck_id, "locker created");
    Ok((StatusCode::CREATED, Json(locker)))
}

/// PUT /api/v1/lockers/{id}
pub async fn update_locker(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLocker>,
) -> AppResult<Json<Locker>> {
    if LockerRepo::find_for_station(&state.pool, id, station.id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Locker",
            id,
        }));
    }

    let locker = LockerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Locker",
            id,
        }))?;
    Ok(Json(locker))
}

/// DELETE /api/v1/lockers/{id}
///
/// Delete a locker and (by cascade) its items. Returns 204 No Content.
pub async fn delete_locker(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LockerRepo::find_for_station(&state.pool, id, station.id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Locker",
            id,
        }));
    }

    LockerRepo::delete(&state.pool, id).await?;
    tracing::info!(locker_id = id, "locker deleted");
    Ok(StatusCode::NO_CONTENT)
}
