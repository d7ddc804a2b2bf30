//! Repository for the `items` table.

use sqlx::PgPool;
use truckchecks_core::types::DbId;

use crate::models::item::{CreateItem, Item, UpdateItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, locker_id, name, created_at, updated_at";

/// Provides CRUD operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item for a locker, returning the created row.
    pub async fn create(
        pool: &PgPool,
        locker_id: DbId,
        input: &CreateItem,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (locker_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(locker_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find an item by id within a station (joined through lockers and trucks).
    pub async fn find_for_station(
        pool: &PgPool,
        id: DbId,
        station_id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            "SELECT i.id, i.locker_id, i.name, i.created_at, i.updated_at
             FROM items i
             JOIN lockers l ON l.id = i.locker_id
             JOIN trucks t ON t.id = l.truck_id
             WHERE i.id = $1 AND t.station_id = $2",
        )
        .bind(id)
        .bind(station_id)
        .fetch_optional(pool)
        .await
    }

    /// List a locker's items, ordered by name.
    pub async fn list_for_locker(pool: &PgPool, locker_id: DbId) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE locker_id = $1 ORDER BY name");
        sqlx::query_as::<_, Item>(&query)
            .bind(locker_id)
            .fetch_all(pool)
            .await
    }

    /// Update an item. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET
                name = COALESCE($2, name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
