//! Check event models.
//!
//! A check records one physical walk-through of a truck: one `checks` row
//! plus one `check_items` row for every item the truck held at that moment.

use serde::Serialize;
use sqlx::FromRow;
use truckchecks_core::types::{DbId, Timestamp};

/// A check row from the `checks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Check {
    pub id: DbId,
    pub truck_id: DbId,
    pub performed_by: String,
    pub checked_at: Timestamp,
}

/// DTO for recording a new check.
pub struct CreateCheck {
    pub performed_by: String,
    /// Items observed present; every other item of the truck is recorded
    /// as missing.
    pub present_item_ids: Vec<DbId>,
}

/// Per-item presence for a check, joined with item and locker names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CheckItemDetail {
    pub item_id: DbId,
    pub item_name: String,
    pub locker_name: String,
    pub is_present: bool,
}

/// One missing item in the latest check of a truck, as reported by
/// `CheckRepo::missing_items_for_station`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MissingItem {
    pub truck_id: DbId,
    pub truck_name: String,
    pub locker_name: String,
    pub item_id: DbId,
    pub item_name: String,
    pub checked_at: Timestamp,
}
