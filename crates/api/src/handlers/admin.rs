//! Handlers for the `/admin` resource (user and assignment management).
//!
//! All handlers require superuser capability via [`RequireSuperuser`]. The
//! legacy shared-password principal qualifies; assignments it grants are
//! recorded with a NULL `created_by` since it has no user id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use truckchecks_core::error::CoreError;
use truckchecks_core::roles::Role;
use truckchecks_core::types::DbId;
use truckchecks_db::models::user::{CreateUser, UpdateUser, UserResponse};
use truckchecks_db::models::user_station::UserStation;
use truckchecks_db::repositories::{StationRepo, UserRepo, UserStationRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireSuperuser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum password length enforced on user creation and password reset.
const MIN_PASSWORD_LENGTH: usize = 12;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// Request body for `PUT /admin/users/{id}/stations`.
#[derive(Debug, Deserialize)]
pub struct ReplaceStationsRequest {
    pub station_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// User handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a new user. Validates password strength, hashes it, and returns
/// a safe [`UserResponse`] with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireSuperuser(_admin): RequireSuperuser,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        password_hash: hashed,
        role: input.role,
    };

    let user = UserRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(user_id = user.id, role = %user.role, "user created");

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/v1/admin/users
///
/// List all users ordered by username.
pub async fn list_users(
    State(state): State<AppState>,
    RequireSuperuser(_admin): RequireSuperuser,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let responses: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data: responses }))
}

/// GET /api/v1/admin/users/{id}
///
/// Get a single user by ID.
pub async fn get_user(
    State(state): State<AppState>,
    RequireSuperuser(_admin): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update a user's profile fields (not password).
pub async fn update_user(
    State(state): State<AppState>,
    RequireSuperuser(_admin): RequireSuperuser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let update_dto = UpdateUser {
        username: input.username,
        role: input.role,
        is_active: input.is_active,
    };

    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivate a user. The row stays for audit references; existing
/// sessions die at their next validation. Returns 204 No Content.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireSuperuser(_admin): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(user_id = id, "user deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Set a new password for a user. Returns 204 No Content.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireSuperuser(_admin): RequireSuperuser,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, id, &hashed).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(user_id = id, "password reset");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Assignment handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users/{id}/stations
///
/// A user's station assignments. Superuser targets typically have none;
/// their access is implicit and not represented here.
pub async fn get_user_stations(
    State(state): State<AppState>,
    RequireSuperuser(_admin): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<UserStation>>>> {
    if UserRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    let assignments = UserStationRepo::list_for_user(&state.pool, id).await?;
    Ok(Json(DataResponse { data: assignments }))
}

/// PUT /api/v1/admin/users/{id}/stations
///
/// Replace a user's station assignments with the given set, recording the
/// granting administrator in `created_by`.
pub async fn replace_user_stations(
    State(state): State<AppState>,
    RequireSuperuser(admin): RequireSuperuser,
    Path(id): Path<DbId>,
    Json(input): Json<ReplaceStationsRequest>,
) -> AppResult<Json<DataResponse<Vec<UserStation>>>> {
    if UserRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    for station_id in &input.station_ids {
        if StationRepo::find_by_id(&state.pool, *station_id).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown station id {station_id}"
            ))));
        }
    }

    UserStationRepo::replace_for_user(&state.pool, id, &input.station_ids, admin.user_id()).await?;
    tracing::info!(
        user_id = id,
        granted_by = ?admin.user_id(),
        count = input.station_ids.len(),
        "station assignments replaced"
    );

    let assignments = UserStationRepo::list_for_user(&state.pool, id).await?;
    Ok(Json(DataResponse { data: assignments }))
}
