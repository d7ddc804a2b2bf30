//! Cookie-session authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;
use truckchecks_core::error::CoreError;

use crate::auth::{AuthService, Identity, RequestContext};
use crate::error::AppError;
use crate::state::AppState;

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequestContext::from_headers(
            &parts.headers,
            &state.config.auth,
        ))
    }
}

/// Authenticated principal extracted from the request cookies.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(CurrentIdentity(identity): CurrentIdentity) -> AppResult<Json<()>> {
///     tracing::info!(user_id = ?identity.user_id(), "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// This is the fail-closed boundary: a database error during validation is
/// logged and rejected as 401, exactly like a missing or invalid credential.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = RequestContext::from_headers(&parts.headers, &state.config.auth);

        match AuthService::authenticate(&state.pool, &ctx).await {
            Ok(Some(identity)) => Ok(CurrentIdentity(identity)),
            Ok(None) => Err(AppError::Core(CoreError::Unauthorized(
                "Authentication required".into(),
            ))),
            Err(e) => {
                tracing::error!(error = %e, "authentication check failed");
                Err(AppError::Core(CoreError::Unauthorized(
                    "Authentication required".into(),
                )))
            }
        }
    }
}
