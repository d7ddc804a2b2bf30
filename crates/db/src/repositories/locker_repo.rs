//! Repository for the `lockers` table.

use sqlx::PgPool;
use truckchecks_core::types::DbId;

use crate::models::locker::{CreateLocker, Locker, UpdateLocker};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, truck_id, name, notes, created_at, updated_at";

/// Provides CRUD operations for lockers.
pub struct LockerRepo;

impl LockerRepo {
    /// Insert a new locker for a truck, returning the created row.
    pub async fn create(
        pool: &PgPool,
        truck_id: DbId,
        input: &CreateLocker,
    ) -> Result<Locker, sqlx::Error> {
        let query = format!(
            "INSERT INTO lockers (truck_id, name, notes)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Locker>(&query)
            .bind(truck_id)
            .bind(&input.name)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a locker by id within a station (joined through trucks).
    pub async fn find_for_station(
        pool: &PgPool,
        id: DbId,
        station_id: DbId,
    ) -> Result<Option<Locker>, sqlx::Error> {
        sqlx::query_as::<_, Locker>(
            "SELECT l.id, l.truck_id, l.name, l.notes, l.created_at, l.updated_at
             FROM lockers l
             JOIN trucks t ON t.id = l.truck_id
             WHERE l.id = $1 AND t.station_id = $2",
        )
        .bind(id)
        .bind(station_id)
        .fetch_optional(pool)
        .await
    }

    /// List a truck's lockers, ordered by name.
    pub async fn list_for_truck(pool: &PgPool, truck_id: DbId) -> Result<Vec<Locker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lockers WHERE truck_id = $1 ORDER BY name");
        sqlx::query_as::<_, Locker>(&query)
            .bind(truck_id)
            .fetch_all(pool)
            .await
    }

    /// Update a locker. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLocker,
    ) -> Result<Option<Locker>, sqlx::Error> {
        let query = format!(
            "UPDATE lockers SET
                name = COALESCE($2, name),
                notes = COALESCE($3, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Locker>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a locker. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lockers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
