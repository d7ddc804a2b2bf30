//! Repository for the `user_sessions` table.
//!
//! All mutations are single-row and keyed by the session token, so replays
//! are harmless and no transactions are needed here.

use sqlx::PgPool;
use truckchecks_core::types::DbId;

use crate::models::session::{CreateSession, UserSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, session_token, expires_at, last_activity, \
                        station_id, ip_address, user_agent, created_at";

/// Provides CRUD operations for user sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, session_token, expires_at, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.session_token)
            .bind(input.expires_at)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Find a session by its token, expired or not.
    ///
    /// Expiry and owning-user checks are the caller's responsibility so that
    /// stale rows can be detected and purged rather than silently skipped.
    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_sessions WHERE session_token = $1");
        sqlx::query_as::<_, UserSession>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Refresh `last_activity` to now. Advisory only; last writer wins.
    pub async fn touch_activity(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_sessions SET last_activity = NOW() WHERE session_token = $1")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Bind a station to the session. Returns `true` if the row was updated.
    pub async fn set_station(
        pool: &PgPool,
        token: &str,
        station_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE user_sessions SET station_id = $2 WHERE session_token = $1")
                .bind(token)
                .bind(station_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a session by token. Returns `true` if a row was deleted.
    pub async fn delete_by_token(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE session_token = $1")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all expired sessions. Returns the count of deleted rows.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE expires_at < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Count sessions belonging to a user.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM user_sessions WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
