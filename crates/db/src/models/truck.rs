//! Truck model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use truckchecks_core::types::{DbId, Timestamp};

/// A truck row from the `trucks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Truck {
    pub id: DbId,
    pub station_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new truck.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTruck {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing truck. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTruck {
    pub name: Option<String>,
    pub description: Option<String>,
}
