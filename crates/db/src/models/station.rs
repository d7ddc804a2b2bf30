//! Station model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use truckchecks_core::types::{DbId, Timestamp};

/// A station row from the `stations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Station {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new station.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStation {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing station. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStation {
    pub name: Option<String>,
    pub description: Option<String>,
}
