//! Shared helpers for HTTP-level integration tests.
//!
//! Requests are driven through `tower::ServiceExt::oneshot` against the same
//! router (and middleware stack) the production binary uses. Authentication
//! is cookie-based, so helpers take an optional `Cookie` header string.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use truckchecks_api::auth::password::hash_password;
use truckchecks_api::config::{AuthConfig, ServerConfig};
use truckchecks_api::router::build_app_router;
use truckchecks_api::state::AppState;
use truckchecks_core::roles::Role;
use truckchecks_core::types::DbId;
use truckchecks_db::models::station::{CreateStation, Station};
use truckchecks_db::models::user::{CreateUser, User};
use truckchecks_db::repositories::{StationRepo, UserRepo, UserStationRepo};

/// Shared password for the legacy login tests.
pub const LEGACY_PASSWORD: &str = "legacy-shared-secret";

/// Plaintext password used for all seeded test users.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        auth: AuthConfig {
            session_expiry_days: 90,
            legacy_password: Some(LEGACY_PASSWORD.to_string()),
            database_name: "truckchecks_test".to_string(),
        },
    }
}

/// Name of the legacy flag cookie under [`test_config`].
pub fn legacy_cookie_name() -> String {
    test_config().auth.legacy_cookie_name()
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub async fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a request with an optional JSON body and optional `Cookie` header.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    cookies: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookies) = cookies {
        builder = builder.header(COOKIE, cookies);
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };

    app.oneshot(request).await.expect("request should succeed")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_with_cookies(app: Router, uri: &str, cookies: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(cookies)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_with_cookies(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookies: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(cookies)).await
}

pub async fn post_with_cookies(app: Router, uri: &str, cookies: &str) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(cookies)).await
}

pub async fn put_json_with_cookies(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookies: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(cookies)).await
}

pub async fn delete_with_cookies(app: Router, uri: &str, cookies: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(cookies)).await
}

/// Collect and parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Cookie helpers
// ---------------------------------------------------------------------------

/// All `Set-Cookie` header values of a response.
pub fn set_cookie_headers(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .collect()
}

/// The value of a named cookie set by the response, if any.
pub fn set_cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookie_headers(response).iter().find_map(|header| {
        let (pair, _attrs) = header.split_once(';').unwrap_or((header.as_str(), ""));
        let (cookie_name, value) = pair.split_once('=')?;
        (cookie_name.trim() == name).then(|| value.trim().to_string())
    })
}

/// Build a `Cookie` header carrying a session token.
pub fn session_cookies(token: &str) -> String {
    format!("user_session={token}")
}

/// Build a `Cookie` header for a legacy-authenticated caller.
pub fn legacy_cookies() -> String {
    format!("{}=true", legacy_cookie_name())
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create a test user directly in the database with [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, username: &str, role: Role) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        password_hash: hashed,
        role,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Create a test station directly in the database.
pub async fn create_test_station(pool: &PgPool, name: &str) -> Station {
    StationRepo::create(
        pool,
        &CreateStation {
            name: name.to_string(),
            description: None,
        },
    )
    .await
    .expect("station creation should succeed")
}

/// Assign a user to stations directly in the database.
pub async fn assign_stations(pool: &PgPool, user_id: DbId, station_ids: &[DbId]) {
    UserStationRepo::replace_for_user(pool, user_id, station_ids, None)
        .await
        .expect("assignment should succeed");
}

/// Log a user in via the API and return their session token.
pub async fn login_user(app: Router, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    set_cookie_value(&response, "user_session").expect("login should set the session cookie")
}
