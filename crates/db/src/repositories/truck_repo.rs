//! Repository for the `trucks` table.
//!
//! Trucks are always addressed within a station; the `*_for_station` lookups
//! enforce the tenant boundary at the query level so a handler cannot reach
//! another station's rows by guessing ids.

use sqlx::PgPool;
use truckchecks_core::types::DbId;

use crate::models::truck::{CreateTruck, Truck, UpdateTruck};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, station_id, name, description, created_at, updated_at";

/// Provides CRUD operations for trucks.
pub struct TruckRepo;

impl TruckRepo {
    /// Insert a new truck for a station, returning the created row.
    pub async fn create(
        pool: &PgPool,
        station_id: DbId,
        input: &CreateTruck,
    ) -> Result<Truck, sqlx::Error> {
        let query = format!(
            "INSERT INTO trucks (station_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Truck>(&query)
            .bind(station_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a truck by id within a station.
    pub async fn find_for_station(
        pool: &PgPool,
        id: DbId,
        station_id: DbId,
    ) -> Result<Option<Truck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trucks WHERE id = $1 AND station_id = $2");
        sqlx::query_as::<_, Truck>(&query)
            .bind(id)
            .bind(station_id)
            .fetch_optional(pool)
            .await
    }

    /// List a station's trucks, ordered by name.
    pub async fn list_for_station(
        pool: &PgPool,
        station_id: DbId,
    ) -> Result<Vec<Truck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trucks WHERE station_id = $1 ORDER BY name");
        sqlx::query_as::<_, Truck>(&query)
            .bind(station_id)
            .fetch_all(pool)
            .await
    }

    /// Update a truck within a station. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the truck does not exist in that station.
    pub async fn update_for_station(
        pool: &PgPool,
        id: DbId,
        station_id: DbId,
        input: &UpdateTruck,
    ) -> Result<Option<Truck>, sqlx::Error> {
        let query = format!(
            "UPDATE trucks SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_at = NOW()
             WHERE id = $1 AND station_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Truck>(&query)
            .bind(id)
            .bind(station_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a truck within a station. Returns `true` if a row was deleted.
    pub async fn delete_for_station(
        pool: &PgPool,
        id: DbId,
        station_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trucks WHERE id = $1 AND station_id = $2")
            .bind(id)
            .bind(station_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
