//! Handlers for the `/auth` resource (login, legacy login, logout, identity
//! and station selection).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use truckchecks_core::error::CoreError;
use truckchecks_core::roles::Role;
use truckchecks_core::types::DbId;
use truckchecks_db::models::station::Station;
use truckchecks_db::models::user::UserResponse;
use truckchecks_db::repositories::StationRepo;

use crate::auth::context::{
    legacy_cookie, preferred_station_cookie, removal_cookie, session_cookie, SESSION_COOKIE,
};
use crate::auth::{AuthService, Identity, RequestContext, StationSource};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentIdentity;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/legacy-login`.
#[derive(Debug, Deserialize)]
pub struct LegacyLoginRequest {
    pub password: String,
}

/// Request body for `PUT /auth/station`.
#[derive(Debug, Deserialize)]
pub struct SetStationRequest {
    pub station_id: DbId,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
}

/// Current principal returned by `GET /auth/me`.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeResponse {
    /// Token-session principal with a real user account.
    User { user: UserResponse },
    /// Legacy shared-password principal; superuser-equivalent, no user id.
    Legacy { role: Role },
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Sets the `user_session` cookie and
/// returns the user. 401 on any credential mismatch, with no hint whether
/// the username or the password was wrong.
pub async fn login(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let outcome =
        AuthService::login(&state.pool, &state.config.auth, &input.username, &input.password, &ctx)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid username or password".into(),
                ))
            })?;

    let jar = jar.add(session_cookie(
        &outcome.token,
        state.config.auth.session_expiry_days,
    ));

    Ok((
        jar,
        Json(LoginResponse {
            user: UserResponse::from(&outcome.user),
        }),
    ))
}

/// POST /api/v1/auth/legacy-login
///
/// Authenticate with the system-wide shared password. Sets the legacy flag
/// cookie; no session row is created. 401 on mismatch or when no legacy
/// secret is configured.
pub async fn legacy_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LegacyLoginRequest>,
) -> AppResult<(CookieJar, StatusCode)> {
    if !AuthService::verify_legacy(&state.config.auth, &input.password) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid password".into(),
        )));
    }

    tracing::info!("legacy shared-password login");
    let jar = jar.add(legacy_cookie(&state.config.auth));
    Ok((jar, StatusCode::NO_CONTENT))
}

/// POST /api/v1/auth/logout
///
/// Delete the caller's session row (if any) and expire the legacy and
/// session cookies. The `preferred_station` cookie survives so the next
/// login on this device keeps its station selection. Returns 204.
pub async fn logout(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
) -> AppResult<(CookieJar, StatusCode)> {
    AuthService::logout(&state.pool, &ctx).await?;

    let jar = jar
        .remove(removal_cookie(SESSION_COOKIE))
        .remove(removal_cookie(state.config.auth.legacy_cookie_name()));

    Ok((jar, StatusCode::NO_CONTENT))
}

/// GET /api/v1/auth/me
///
/// The caller's identity: the user row for token sessions, or the legacy
/// marker with its effective role.
pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> AppResult<Json<MeResponse>> {
    let response = match &identity {
        Identity::User(user) => MeResponse::User {
            user: UserResponse::from(user),
        },
        Identity::Legacy => MeResponse::Legacy {
            role: identity.role(),
        },
    };
    Ok(Json(response))
}

/// GET /api/v1/auth/stations
///
/// The caller's accessible stations, ordered by name.
pub async fn my_stations(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Station>>>> {
    let stations = AuthService::user_stations(&state.pool, &identity).await?;
    Ok(Json(DataResponse { data: stations }))
}

/// PUT /api/v1/auth/station
///
/// Select the current station. 422 `STATION_NOT_ACCESSIBLE` when the id is
/// not in the caller's accessible set; nothing is changed in that case.
/// On success the selection is persisted (session row for token sessions)
/// and the 365-day `preferred_station` cookie is set.
pub async fn set_station(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    ctx: RequestContext,
    jar: CookieJar,
    Json(input): Json<SetStationRequest>,
) -> AppResult<(CookieJar, Json<Station>)> {
    let selected =
        AuthService::set_current_station(&state.pool, &identity, &ctx, input.station_id).await?;
    if !selected {
        return Err(AppError::StationNotAccessible);
    }

    let station = StationRepo::find_by_id(&state.pool, input.station_id)
        .await?
        .ok_or(AppError::StationNotAccessible)?;

    let jar = jar.add(preferred_station_cookie(station.id));
    Ok((jar, Json(station)))
}

/// GET /api/v1/auth/station
///
/// Resolve the current station through the fallback chain (session binding,
/// preferred-station cookie, single-station auto-select). 409
/// `STATION_NOT_SELECTED` when nothing resolves. When the resolution did not
/// come from the session binding, the `preferred_station` cookie is
/// (re)written so the next request resolves without the fallback.
pub async fn get_station(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    ctx: RequestContext,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<Station>)> {
    let resolved = AuthService::current_station(&state.pool, &identity, &ctx)
        .await?
        .ok_or(AppError::StationNotSelected)?;

    let jar = if resolved.source != StationSource::Session {
        jar.add(preferred_station_cookie(resolved.station.id))
    } else {
        jar
    };

    Ok((jar, Json(resolved.station)))
}
