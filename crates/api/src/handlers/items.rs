//! Handlers for items, nested under lockers for listing/creation and
//! addressed directly for updates/deletion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use truckchecks_core::error::CoreError;
use truckchecks_core::types::DbId;
use truckchecks_db::models::item::{CreateItem, Item, UpdateItem};
use truckchecks_db::repositories::{ItemRepo, LockerRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStation;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/lockers/{locker_id}/items
pub async fn list_items(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(locker_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Item>>>> {
    if LockerRepo::find_for_station(&state.pool, locker_id, station.id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Locker",
            id: locker_id,
        }));
    }

    let items = ItemRepo::list_for_locker(&state.pool, locker_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/lockers/{locker_id}/items
pub async fn create_item(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(locker_id): Path<DbId>,
    Json(input): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    if LockerRepo::find_for_station(&state.pool, locker_id, station.id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Locker",
            id: locker_id,
        }));
    }

    let item = ItemRepo::create(&state.pool, locker_id, &input).await?;
    tracing::info!(item_id = item.id, locker_id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/v1/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    if ItemRepo::find_for_station(&state.pool, id, station.id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound { entity: "Item", id }));
    }

    let item = ItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Item", id }))?;
    Ok(Json(item))
}

/// DELETE /api/v1/items/{id}
///
/// Delete an item. Past check records referencing it go with it (cascade).
/// Returns 204 No Content.
pub async fn delete_item(
    State(state): State<AppState>,
    RequireStation(_identity, station): RequireStation,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ItemRepo::find_for_station(&state.pool, id, station.id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound { entity: "Item", id }));
    }

    ItemRepo::delete(&state.pool, id).await?;
    tracing::info!(item_id = id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}
