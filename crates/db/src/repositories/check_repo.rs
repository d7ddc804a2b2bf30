//! Repository for the `checks` and `check_items` tables.

use sqlx::PgPool;
use truckchecks_core::types::DbId;

use crate::models::check::{Check, CheckItemDetail, CreateCheck, MissingItem};

/// Provides check recording and reporting queries.
pub struct CheckRepo;

impl CheckRepo {
    /// Record a check for a truck.
    ///
    /// Inserts one `checks` row and one `check_items` row per item the truck
    /// currently holds, marking presence from `input.present_item_ids`. Item
    /// ids in the input that do not belong to the truck are ignored. The
    /// whole write runs in a transaction so a check is never half-recorded.
    pub async fn create_with_items(
        pool: &PgPool,
        truck_id: DbId,
        input: &CreateCheck,
    ) -> Result<Check, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let check = sqlx::query_as::<_, Check>(
            "INSERT INTO checks (truck_id, performed_by)
             VALUES ($1, $2)
             RETURNING id, truck_id, performed_by, checked_at",
        )
        .bind(truck_id)
        .bind(&input.performed_by)
        .fetch_one(&mut *tx)
        .await?;

        let item_ids: Vec<(DbId,)> = sqlx::query_as(
            "SELECT i.id FROM items i
             JOIN lockers l ON l.id = i.locker_id
             WHERE l.truck_id = $1",
        )
        .bind(truck_id)
        .fetch_all(&mut *tx)
        .await?;

        for (item_id,) in item_ids {
            let is_present = input.present_item_ids.contains(&item_id);
            sqlx::query(
                "INSERT INTO check_items (check_id, item_id, is_present)
                 VALUES ($1, $2, $3)",
            )
            .bind(check.id)
            .bind(item_id)
            .bind(is_present)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(check)
    }

    /// The most recent check of a truck, if any.
    pub async fn find_latest_for_truck(
        pool: &PgPool,
        truck_id: DbId,
    ) -> Result<Option<Check>, sqlx::Error> {
        sqlx::query_as::<_, Check>(
            "SELECT id, truck_id, performed_by, checked_at
             FROM checks
             WHERE truck_id = $1
             ORDER BY checked_at DESC, id DESC
             LIMIT 1",
        )
        .bind(truck_id)
        .fetch_optional(pool)
        .await
    }

    /// Per-item presence for a check, with item and locker names.
    pub async fn items_for_check(
        pool: &PgPool,
        check_id: DbId,
    ) -> Result<Vec<CheckItemDetail>, sqlx::Error> {
        sqlx::query_as::<_, CheckItemDetail>(
            "SELECT ci.item_id, i.name AS item_name, l.name AS locker_name, ci.is_present
             FROM check_items ci
             JOIN items i ON i.id = ci.item_id
             JOIN lockers l ON l.id = i.locker_id
             WHERE ci.check_id = $1
             ORDER BY l.name, i.name",
        )
        .bind(check_id)
        .fetch_all(pool)
        .await
    }

    /// Items recorded missing in the latest check of each truck of a station.
    ///
    /// Trucks with no checks yet contribute no rows; they have never had a
    /// presence observation to report against.
    pub async fn missing_items_for_station(
        pool: &PgPool,
        station_id: DbId,
    ) -> Result<Vec<MissingItem>, sqlx::Error> {
        sqlx::query_as::<_, MissingItem>(
            "SELECT t.id AS truck_id, t.name AS truck_name, l.name AS locker_name,
                    i.id AS item_id, i.name AS item_name, c.checked_at
             FROM trucks t
             JOIN checks c ON c.id = (
                 SELECT c2.id FROM checks c2
                 WHERE c2.truck_id = t.id
                 ORDER BY c2.checked_at DESC, c2.id DESC
                 LIMIT 1
             )
             JOIN check_items ci ON ci.check_id = c.id AND ci.is_present = false
             JOIN items i ON i.id = ci.item_id
             JOIN lockers l ON l.id = i.locker_id
             WHERE t.station_id = $1
             ORDER BY t.name, l.name, i.name",
        )
        .bind(station_id)
        .fetch_all(pool)
        .await
    }
}
