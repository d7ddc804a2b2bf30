//! Repository-level tests for the auth tables: sessions and station
//! assignments against a real database.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use truckchecks_core::roles::Role;
use truckchecks_db::models::session::CreateSession;
use truckchecks_db::models::station::CreateStation;
use truckchecks_db::models::user::{CreateUser, User};
use truckchecks_db::repositories::{SessionRepo, StationRepo, UserRepo, UserStationRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: Role::StationAdmin,
        },
    )
    .await
    .expect("user creation should succeed")
}

fn new_session(user_id: i64, token: &str, expires_in_days: i64) -> CreateSession {
    CreateSession {
        user_id,
        session_token: token.to_string(),
        expires_at: Utc::now() + Duration::days(expires_in_days),
        ip_address: Some("10.0.0.1".to_string()),
        user_agent: Some("test-agent".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_create_and_find(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;

    let created = SessionRepo::create(&pool, &new_session(user.id, "tok-1", 90))
        .await
        .unwrap();
    assert_eq!(created.user_id, user.id);
    assert_eq!(created.station_id, None);
    assert_eq!(created.ip_address.as_deref(), Some("10.0.0.1"));

    let found = SessionRepo::find_by_token(&pool, "tok-1").await.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, created.id);

    let missing = SessionRepo::find_by_token(&pool, "tok-unknown").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_token_is_unique(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;

    SessionRepo::create(&pool, &new_session(user.id, "tok-dup", 90))
        .await
        .unwrap();
    let result = SessionRepo::create(&pool, &new_session(user.id, "tok-dup", 90)).await;
    assert_matches!(
        result,
        Err(sqlx::Error::Database(_)),
        "duplicate token must violate uq constraint"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_station_binding(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let station = StationRepo::create(
        &pool,
        &CreateStation {
            name: "Alpha".into(),
            description: None,
        },
    )
    .await
    .unwrap();

    SessionRepo::create(&pool, &new_session(user.id, "tok-1", 90))
        .await
        .unwrap();

    let updated = SessionRepo::set_station(&pool, "tok-1", station.id).await.unwrap();
    assert!(updated);
    let session = SessionRepo::find_by_token(&pool, "tok-1").await.unwrap().unwrap();
    assert_eq!(session.station_id, Some(station.id));

    // Unknown token touches nothing.
    let updated = SessionRepo::set_station(&pool, "tok-ghost", station.id).await.unwrap();
    assert!(!updated);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_expired_sessions(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;

    SessionRepo::create(&pool, &new_session(user.id, "tok-live", 90))
        .await
        .unwrap();
    SessionRepo::create(&pool, &new_session(user.id, "tok-dead", -1))
        .await
        .unwrap();

    let deleted = SessionRepo::delete_expired(&pool).await.unwrap();
    assert_eq!(deleted, 1);

    assert!(SessionRepo::find_by_token(&pool, "tok-live").await.unwrap().is_some());
    assert!(SessionRepo::find_by_token(&pool, "tok-dead").await.unwrap().is_none());
    assert_eq!(SessionRepo::count_for_user(&pool, user.id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sessions_cascade_with_user(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    SessionRepo::create(&pool, &new_session(user.id, "tok-1", 90))
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(SessionRepo::find_by_token(&pool, "tok-1").await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Station assignments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_assignments(pool: PgPool) {
    let granter = seed_user(&pool, "root").await;
    let user = seed_user(&pool, "alice").await;
    let station_a = StationRepo::create(
        &pool,
        &CreateStation {
            name: "Alpha".into(),
            description: None,
        },
    )
    .await
    .unwrap();
    let station_b = StationRepo::create(
        &pool,
        &CreateStation {
            name: "Bravo".into(),
            description: None,
        },
    )
    .await
    .unwrap();

    UserStationRepo::replace_for_user(&pool, user.id, &[station_a.id, station_b.id], Some(granter.id))
        .await
        .unwrap();

    assert!(UserStationRepo::is_assigned(&pool, user.id, station_a.id).await.unwrap());
    let rows = UserStationRepo::list_for_user(&pool, user.id).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].created_by, Some(granter.id));

    // Replacement is total: the old set is gone.
    UserStationRepo::replace_for_user(&pool, user.id, &[station_b.id], Some(granter.id))
        .await
        .unwrap();
    assert!(!UserStationRepo::is_assigned(&pool, user.id, station_a.id).await.unwrap());
    assert!(UserStationRepo::is_assigned(&pool, user.id, station_b.id).await.unwrap());

    let stations = StationRepo::list_for_user(&pool, user.id).await.unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].name, "Bravo");
}

/// A replacement containing an unknown station id fails atomically: the
/// previous assignment set survives.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_assignments_rolls_back(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let station = StationRepo::create(
        &pool,
        &CreateStation {
            name: "Alpha".into(),
            description: None,
        },
    )
    .await
    .unwrap();

    UserStationRepo::replace_for_user(&pool, user.id, &[station.id], None)
        .await
        .unwrap();

    let result = UserStationRepo::replace_for_user(&pool, user.id, &[99999], None).await;
    assert_matches!(
        result,
        Err(sqlx::Error::Database(_)),
        "unknown station id must violate the FK"
    );

    assert!(
        UserStationRepo::is_assigned(&pool, user.id, station.id).await.unwrap(),
        "failed replacement must leave the old set intact"
    );
}
