//! Item model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use truckchecks_core::types::{DbId, Timestamp};

/// An item row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub locker_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItem {
    pub name: String,
}

/// DTO for updating an existing item. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItem {
    pub name: Option<String>,
}
