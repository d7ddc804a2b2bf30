//! Role and capability model.
//!
//! Roles are stored as plain text in the `users.role` column. Authorization
//! decisions go through the capability predicates on [`Role`] so call sites
//! never compare raw strings and new roles only touch this module.

use serde::{Deserialize, Serialize};

/// Role name as stored in `users.role`.
pub const ROLE_SUPERUSER: &str = "superuser";
/// Role name as stored in `users.role`.
pub const ROLE_STATION_ADMIN: &str = "station_admin";

/// A user's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Superuser,
    StationAdmin,
}

impl Role {
    /// Parse a stored role name. Unknown names map to `None`; callers that
    /// must not fail open should treat `None` as the least-privileged role.
    pub fn parse(name: &str) -> Option<Role> {
        match name {
            ROLE_SUPERUSER => Some(Role::Superuser),
            ROLE_STATION_ADMIN => Some(Role::StationAdmin),
            _ => None,
        }
    }

    /// The stored/wire name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superuser => ROLE_SUPERUSER,
            Role::StationAdmin => ROLE_STATION_ADMIN,
        }
    }

    /// Whether this role may act on every station without an explicit
    /// assignment row.
    pub fn can_access_all_stations(&self) -> bool {
        matches!(self, Role::Superuser)
    }

    /// Whether this role may manage user accounts, station assignments, and
    /// stations themselves.
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Superuser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("superuser"), Some(Role::Superuser));
        assert_eq!(Role::parse("station_admin"), Some(Role::StationAdmin));
        assert_eq!(Role::parse("janitor"), None);
    }

    #[test]
    fn test_round_trip_as_str() {
        for role in [Role::Superuser, Role::StationAdmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_capabilities() {
        assert!(Role::Superuser.can_access_all_stations());
        assert!(Role::Superuser.can_manage_users());
        assert!(!Role::StationAdmin.can_access_all_stations());
        assert!(!Role::StationAdmin.can_manage_users());
    }
}
