//! Authorization extractors built on [`CurrentIdentity`].
//!
//! The three guards compose linearly: station and superuser both run the
//! authentication check first. There is no partially-authenticated state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use truckchecks_core::error::CoreError;
use truckchecks_db::models::station::Station;

use super::auth::CurrentIdentity;
use crate::auth::{AuthService, Identity, RequestContext};
use crate::error::AppError;
use crate::state::AppState;

/// Requires any authenticated principal. Rejects with 401 otherwise.
///
/// Functionally equivalent to [`CurrentIdentity`] but named explicitly for
/// use in route handlers where the intent "this route requires
/// authentication" should be self-documenting.
pub struct RequireAuth(pub Identity);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentIdentity(identity) = CurrentIdentity::from_request_parts(parts, state).await?;
        Ok(RequireAuth(identity))
    }
}

/// Requires a superuser-capable principal (real superuser or the legacy
/// shared-password principal). Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireSuperuser(identity): RequireSuperuser) -> AppResult<Json<()>> {
///     // identity is guaranteed superuser-capable here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireSuperuser(pub Identity);

impl FromRequestParts<AppState> for RequireSuperuser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentIdentity(identity) = CurrentIdentity::from_request_parts(parts, state).await?;
        if !identity.role().can_manage_users() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Superuser role required".into(),
            )));
        }
        Ok(RequireSuperuser(identity))
    }
}

/// Requires an authenticated principal with a resolved current station.
///
/// Runs the full station fallback chain (session binding, preferred-station
/// cookie, single-station auto-select) and rejects with 409
/// `STATION_NOT_SELECTED` when nothing resolves, which is the API rendering
/// of "redirect to station selection". A resolution error fails closed to
/// the same rejection.
pub struct RequireStation(pub Identity, pub Station);

impl FromRequestParts<AppState> for RequireStation {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentIdentity(identity) = CurrentIdentity::from_request_parts(parts, state).await?;
        let ctx = RequestContext::from_headers(&parts.headers, &state.config.auth);

        match AuthService::current_station(&state.pool, &identity, &ctx).await {
            Ok(Some(resolved)) => Ok(RequireStation(identity, resolved.station)),
            Ok(None) => Err(AppError::StationNotSelected),
            Err(e) => {
                tracing::error!(error = %e, "station resolution failed");
                Err(AppError::StationNotSelected)
            }
        }
    }
}
