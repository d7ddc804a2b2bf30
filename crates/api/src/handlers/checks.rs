//! Handlers for recording and reading truck checks.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use truckchecks_core::error::CoreError;
use truckchecks_core::types::DbId;
use truckchecks_db::models::check::{Check, CheckItemDetail, CreateCheck};
use truckchecks_db::repositories::{CheckRepo, TruckRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStation;
use crate::state::AppState;

/// Request body for `POST /trucks/{truck_id}/checks`.
#[derive(Debug, Deserialize)]
pub struct RecordCheckRequest {
    /// Who performed the walk-through (free text; field users are not
    /// necessarily account holders).
    pub performed_by: String,
    /// Items observed present. Every other item of the truck is recorded
    /// as missing.
    pub present_item_ids: Vec<DbId>,
}

/// A check with its per-item presence rows.
#[derive(Debug, Serialize)]
pub struct CheckDetailResponse {
    pub check: Check,
    pub items: Vec<CheckItemDetail>,
}

/// POST /api/v1/trucks/{truck_id}/checks
///
/// Record a check for a truck of the current station with 201 Created.
pub async fn record_check(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(truck_id): Path<DbId>,
    Json(input): Json<RecordCheckRequest>,
) -> AppResult<(StatusCode, Json<CheckDetailResponse>)> {
    if TruckRepo::find_for_station(&state.pool, truck_id, station.id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Truck",
            id: truck_id,
        }));
    }

    let create_dto = CreateCheck {
        performed_by: input.performed_by,
        present_item_ids: input.present_item_ids,
    };

    let check = CheckRepo::create_with_items(&state.pool, truck_id, &create_dto).await?;
    let items = CheckRepo::items_for_check(&state.pool, check.id).await?;
    tracing::info!(check_id = check.id, truck_id, "check recorded");

    Ok((StatusCode::CREATED, Json(CheckDetailResponse { check, items })))
}

/// GET /api/v1/trucks/{truck_id}/checks/latest
///
/// The most recent check of a truck with per-item presence. 404 when the
/// truck has never been checked.
pub async fn latest_check(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(truck_id): Path<DbId>,
) -> AppResult<Json<CheckDetailResponse>> {
    if TruckRepo::find_for_station(&state.pool, truck_id, station.id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Truck",
            id: truck_id,
        }));
    }

    let check = CheckRepo::find_latest_for_truck(&state.pool, truck_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Check",
            id: truck_id,
        }))?;

    let items = CheckRepo::items_for_check(&state.pool, check.id).await?;
    Ok(Json(CheckDetailResponse { check, items }))
}
