//! Per-request authentication state, reified from headers.
//!
//! Instead of reading cookies and client metadata from ambient request
//! globals, everything the auth core needs from the HTTP layer is parsed
//! once into a [`RequestContext`] value. This keeps the authorization logic
//! callable (and testable) without a live HTTP request.

use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use truckchecks_core::types::DbId;

use crate::config::AuthConfig;

/// Cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "user_session";
/// Cookie carrying the last-selected station id. Survives logout.
pub const PREFERRED_STATION_COOKIE: &str = "preferred_station";

/// Lifetime of the legacy flag cookie, in days.
pub const LEGACY_COOKIE_DAYS: i64 = 90;
/// Lifetime of the preferred-station cookie, in days.
pub const PREFERRED_STATION_COOKIE_DAYS: i64 = 365;

/// Cookie and client metadata extracted from one request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Token from the `user_session` cookie, if present.
    pub session_token: Option<String>,
    /// True iff the legacy flag cookie holds the literal string `"true"`.
    pub legacy_login: bool,
    /// Station id from the `preferred_station` cookie, if parseable.
    pub preferred_station: Option<DbId>,
    /// Client IP, from `X-Forwarded-For` (first hop).
    pub ip_address: Option<String>,
    /// Client user agent header.
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Parse the context from request headers.
    pub fn from_headers(headers: &HeaderMap, auth: &AuthConfig) -> Self {
        let jar = CookieJar::from_headers(headers);

        let session_token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

        let legacy_login = jar
            .get(&auth.legacy_cookie_name())
            .is_some_and(|c| c.value() == "true");

        let preferred_station = jar
            .get(PREFERRED_STATION_COOKIE)
            .and_then(|c| c.value().parse::<DbId>().ok());

        let ip_address = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let user_agent = headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        RequestContext {
            session_token,
            legacy_login,
            preferred_station,
            ip_address,
            user_agent,
        }
    }
}

/// Build the `user_session` cookie for a fresh login.
///
/// The cookie lifetime matches the session row expiry, so the browser drops
/// the token at roughly the same time the server stops honouring it.
pub fn session_cookie(token: &str, session_expiry_days: i64) -> Cookie<'static> {
    base_cookie(SESSION_COOKIE, token.to_string(), session_expiry_days)
}

/// Build the legacy "logged in" flag cookie.
pub fn legacy_cookie(auth: &AuthConfig) -> Cookie<'static> {
    base_cookie(auth.legacy_cookie_name(), "true".to_string(), LEGACY_COOKIE_DAYS)
}

/// Build the `preferred_station` cookie.
pub fn preferred_station_cookie(station_id: DbId) -> Cookie<'static> {
    base_cookie(
        PREFERRED_STATION_COOKIE,
        station_id.to_string(),
        PREFERRED_STATION_COOKIE_DAYS,
    )
}

/// Build a removal cookie (used by logout to expire auth cookies).
pub fn removal_cookie(name: impl Into<String>) -> Cookie<'static> {
    Cookie::build((name.into(), "")).path("/").build()
}

fn base_cookie(name: impl Into<String>, value: String, days: i64) -> Cookie<'static> {
    Cookie::build((name.into(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(days))
        .build()
}
