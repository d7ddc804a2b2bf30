//! Locker model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use truckchecks_core::types::{DbId, Timestamp};

/// A locker row from the `lockers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Locker {
    pub id: DbId,
    pub truck_id: DbId,
    pub name: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new locker.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocker {
    pub name: String,
    pub notes: Option<String>,
}

/// DTO for updating an existing locker. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLocker {
    pub name: Option<String>,
    pub notes: Option<String>,
}
