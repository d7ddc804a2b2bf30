//! HTTP-level integration tests for the superuser admin surface: user
//! management, station assignments, and station management.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_with_cookies, get_with_cookies, legacy_cookies, post_json,
    post_json_with_cookies, put_json_with_cookies, session_cookies,
};
use sqlx::PgPool;
use truckchecks_core::roles::Role;
use truckchecks_db::models::truck::CreateTruck;
use truckchecks_db::repositories::{TruckRepo, UserRepo, UserStationRepo};

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

/// Admin routes reject unauthenticated callers with 401 and
/// non-superusers with 403.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_requires_superuser(pool: PgPool) {
    common::create_test_user(&pool, "plain", Role::StationAdmin).await;
    let app = common::build_test_app(pool).await;

    let response = common::get(app.clone(), "/api/v1/admin/users").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = common::login_user(app.clone(), "plain").await;
    let response = get_with_cookies(app, "/api/v1/admin/users", &session_cookies(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

/// The legacy shared-password principal is superuser-equivalent and may
/// use the admin surface.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_legacy_principal_reaches_admin(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = get_with_cookies(app, "/api/v1/admin/users", &legacy_cookies()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

/// Create, list, fetch, update, and deactivate a user.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_lifecycle(pool: PgPool) {
    common::create_test_user(&pool, "root", Role::Superuser).await;
    let app = common::build_test_app(pool.clone()).await;
    let token = common::login_user(app.clone(), "root").await;
    let cookies = session_cookies(&token);

    // Create.
    let body = serde_json::json!({
        "username": "firefighter",
        "password": "a-long-enough-password",
        "role": "station_admin",
    });
    let response =
        post_json_with_cookies(app.clone(), "/api/v1/admin/users", body, &cookies).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["username"], "firefighter");
    assert_eq!(created["role"], "station_admin");
    assert!(created["password_hash"].is_null(), "hash must never leak");
    let user_id = created["id"].as_i64().unwrap();

    // List includes both users.
    let response = get_with_cookies(app.clone(), "/api/v1/admin/users", &cookies).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    // Update role.
    let body = serde_json::json!({ "role": "superuser" });
    let response = put_json_with_cookies(
        app.clone(),
        &format!("/api/v1/admin/users/{user_id}"),
        body,
        &cookies,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "superuser");

    // Deactivate (soft): the row survives.
    let response = delete_with_cookies(
        app.clone(),
        &format!("/api/v1/admin/users/{user_id}"),
        &cookies,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert!(!user.is_active);

    // Deactivating again is a 404 (already inactive).
    let response = delete_with_cookies(
        app,
        &format!("/api/v1/admin/users/{user_id}"),
        &cookies,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// User creation enforces minimum password strength.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_weak_password(pool: PgPool) {
    common::create_test_user(&pool, "root", Role::Superuser).await;
    let app = common::build_test_app(pool).await;
    let token = common::login_user(app.clone(), "root").await;

    let body = serde_json::json!({
        "username": "weak",
        "password": "short",
        "role": "station_admin",
    });
    let response =
        post_json_with_cookies(app, "/api/v1/admin/users", body, &session_cookies(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// Duplicate usernames violate `uq_users_username` and map to 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_duplicate_username(pool: PgPool) {
    common::create_test_user(&pool, "root", Role::Superuser).await;
    common::create_test_user(&pool, "taken", Role::StationAdmin).await;
    let app = common::build_test_app(pool).await;
    let token = common::login_user(app.clone(), "root").await;

    let body = serde_json::json!({
        "username": "taken",
        "password": "a-long-enough-password",
        "role": "station_admin",
    });
    let response =
        post_json_with_cookies(app, "/api/v1/admin/users", body, &session_cookies(&token)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Password reset takes effect immediately: the old password stops working
/// and the new one logs in.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_password(pool: PgPool) {
    common::create_test_user(&pool, "root", Role::Superuser).await;
    let target = common::create_test_user(&pool, "forgetful", Role::StationAdmin).await;
    let app = common::build_test_app(pool).await;
    let token = common::login_user(app.clone(), "root").await;

    let body = serde_json::json!({ "new_password": "brand-new-password-42" });
    let response = post_json_with_cookies(
        app.clone(),
        &format!("/api/v1/admin/users/{}/reset-password", target.id),
        body,
        &session_cookies(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "username": "forgetful", "password": common::TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = serde_json::json!({ "username": "forgetful", "password": "brand-new-password-42" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Station assignments
// ---------------------------------------------------------------------------

/// Replacing assignments records the granting administrator and is
/// reflected in the user's accessible set.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_assignments(pool: PgPool) {
    let root = common::create_test_user(&pool, "root", Role::Superuser).await;
    let target = common::create_test_user(&pool, "scoped", Role::StationAdmin).await;
    let station_a = common::create_test_station(&pool, "Alpha").await;
    let station_b = common::create_test_station(&pool, "Bravo").await;

    let app = common::build_test_app(pool.clone()).await;
    let token = common::login_user(app.clone(), "root").await;
    let cookies = session_cookies(&token);

    let body = serde_json::json!({ "station_ids": [station_a.id, station_b.id] });
    let response = put_json_with_cookies(
        app.clone(),
        &format!("/api/v1/admin/users/{}/stations", target.id),
        body,
        &cookies,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"][0]["created_by"], root.id);

    // Shrink to one; the removed assignment is really gone.
    let body = serde_json::json!({ "station_ids": [station_b.id] });
    let response = put_json_with_cookies(
        app.clone(),
        &format!("/api/v1/admin/users/{}/stations", target.id),
        body,
        &cookies,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let assigned = UserStationRepo::is_assigned(&pool, target.id, station_a.id)
        .await
        .unwrap();
    assert!(!assigned);

    // Unknown station ids are rejected before anything changes.
    let body = serde_json::json!({ "station_ids": [99999] });
    let response = put_json_with_cookies(
        app,
        &format!("/api/v1/admin/users/{}/stations", target.id),
        body,
        &cookies,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let assigned = UserStationRepo::is_assigned(&pool, target.id, station_b.id)
        .await
        .unwrap();
    assert!(assigned, "failed replace must not clear existing assignments");
}

// ---------------------------------------------------------------------------
// Station management
// ---------------------------------------------------------------------------

/// Create, update, and delete a station; deletion is refused while the
/// station owns trucks.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_station_lifecycle(pool: PgPool) {
    common::create_test_user(&pool, "root", Role::Superuser).await;
    let app = common::build_test_app(pool.clone()).await;
    let token = common::login_user(app.clone(), "root").await;
    let cookies = session_cookies(&token);

    let body = serde_json::json!({ "name": "North", "description": "North side crews" });
    let response =
        post_json_with_cookies(app.clone(), "/api/v1/admin/stations", body, &cookies).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let station_id = created["id"].as_i64().unwrap();

    // Duplicate name: 409.
    let body = serde_json::json!({ "name": "North" });
    let response =
        post_json_with_cookies(app.clone(), "/api/v1/admin/stations", body, &cookies).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Rename.
    let body = serde_json::json!({ "name": "North Ridge" });
    let response = put_json_with_cookies(
        app.clone(),
        &format!("/api/v1/admin/stations/{station_id}"),
        body,
        &cookies,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "North Ridge");

    // With a truck attached, deletion is refused.
    let truck = TruckRepo::create(
        &pool,
        station_id,
        &CreateTruck {
            name: "Engine 1".into(),
            description: None,
        },
    )
    .await
    .unwrap();
    let response = delete_with_cookies(
        app.clone(),
        &format!("/api/v1/admin/stations/{station_id}"),
        &cookies,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Without trucks it deletes cleanly.
    TruckRepo::delete_for_station(&pool, truck.id, station_id)
        .await
        .unwrap();
    let response = delete_with_cookies(
        app,
        &format!("/api/v1/admin/stations/{station_id}"),
        &cookies,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
