//! Repository for the `user_stations` assignment table.

use sqlx::PgPool;
use truckchecks_core::types::DbId;

use crate::models::user_station::UserStation;

/// Provides operations on station assignments.
pub struct UserStationRepo;

impl UserStationRepo {
    /// List a user's assignments, ordered by station id.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserStation>, sqlx::Error> {
        sqlx::query_as::<_, UserStation>(
            "SELECT user_id, station_id, created_by, created_at
             FROM user_stations
             WHERE user_id = $1
             ORDER BY station_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Whether a user holds an assignment for the given station.
    pub async fn is_assigned(
        pool: &PgPool,
        user_id: DbId,
        station_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM user_stations WHERE user_id = $1 AND station_id = $2
             )",
        )
        .bind(user_id)
        .bind(station_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Replace a user's assignments with the given station set.
    ///
    /// Runs in a transaction so a partial replacement is never visible.
    /// `created_by` records the administrator who granted the assignments
    /// (None when granted by the legacy shared-password principal).
    pub async fn replace_for_user(
        pool: &PgPool,
        user_id: DbId,
        station_ids: &[DbId],
        created_by: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM user_stations WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for station_id in station_ids {
            sqlx::query(
                "INSERT INTO user_stations (user_id, station_id, created_by)
                 VALUES ($1, $2, $3)",
            )
            .bind(user_id)
            .bind(station_id)
            .bind(created_by)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }
}
