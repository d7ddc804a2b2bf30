//! Repository for the `stations` table.

use sqlx::PgPool;
use truckchecks_core::types::DbId;

use crate::models::station::{CreateStation, Station, UpdateStation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides CRUD operations for stations.
pub struct StationRepo;

impl StationRepo {
    /// Insert a new station, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStation) -> Result<Station, sqlx::Error> {
        let query = format!(
            "INSERT INTO stations (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Station>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a station by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Station>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stations WHERE id = $1");
        sqlx::query_as::<_, Station>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all stations ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Station>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stations ORDER BY name");
        sqlx::query_as::<_, Station>(&query).fetch_all(pool).await
    }

    /// List the stations assigned to a user, ordered by name.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Station>, sqlx::Error> {
        sqlx::query_as::<_, Station>(
            "SELECT s.id, s.name, s.description, s.created_at, s.updated_at
             FROM stations s
             JOIN user_stations us ON us.station_id = s.id
             WHERE us.user_id = $1
             ORDER BY s.name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Update a station. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStation,
    ) -> Result<Option<Station>, sqlx::Error> {
        let query = format!(
            "UPDATE stations SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Station>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Count trucks owned by a station (delete guard).
    pub async fn truck_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trucks WHERE station_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Delete a station. Returns `true` if a row was deleted.
    ///
    /// The `trucks.station_id` foreign key is RESTRICT, so this fails at the
    /// database level if the caller skipped the [`Self::truck_count`] guard.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
