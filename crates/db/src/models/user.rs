//! User model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use truckchecks_core::roles::Role;
use truckchecks_core::types::{DbId, Timestamp};

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// The parsed role. Unknown role names (possible only if the CHECK
    /// constraint drifts from the code) degrade to the least-privileged role.
    pub fn role(&self) -> Role {
        Role::parse(&self.role).unwrap_or(Role::StationAdmin)
    }
}

/// DTO for creating a new user.
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// DTO for updating an existing user. All fields are optional.
pub struct UpdateUser {
    pub username: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username.clone(),
            role: user.role(),
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}
