//! Station assignment model.

use serde::Serialize;
use sqlx::FromRow;
use truckchecks_core::types::{DbId, Timestamp};

/// A station assignment row from the `user_stations` table.
///
/// Links a `station_admin` user to a station and records who granted the
/// assignment. Superusers have no rows here; their access is implicit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserStation {
    pub user_id: DbId,
    pub station_id: DbId,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}
