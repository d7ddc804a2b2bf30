//! User session model and DTOs.

use sqlx::FromRow;
use truckchecks_core::types::{DbId, Timestamp};

/// A user session row from the `user_sessions` table.
///
/// `session_token` is the opaque credential the client presents; it is
/// stored verbatim because the token itself is already a random 256-bit
/// value with no derivable structure.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub session_token: String,
    pub expires_at: Timestamp,
    pub last_activity: Timestamp,
    pub station_id: Option<DbId>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new user session.
pub struct CreateSession {
    pub user_id: DbId,
    pub session_token: String,
    pub expires_at: Timestamp,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
