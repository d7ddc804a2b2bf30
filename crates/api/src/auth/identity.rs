//! The authenticated principal.

use truckchecks_core::roles::Role;
use truckchecks_core::types::DbId;
use truckchecks_db::models::user::User;

/// Who is making the request.
///
/// Token-session logins carry the full user row; the legacy shared-password
/// cookie carries no identity at all, so it gets its own variant rather than
/// a pseudo-user with sentinel fields. Callers pattern-match when they need
/// a real user id (audit columns, assignment grants).
#[derive(Debug, Clone)]
pub enum Identity {
    /// Authenticated via a session token; the owning user row.
    User(User),
    /// Authenticated via the legacy shared-password cookie.
    /// Superuser-equivalent, but with no per-user identity.
    Legacy,
}

impl Identity {
    /// The effective role. The legacy principal predates per-user accounts
    /// and has always been superuser-equivalent.
    pub fn role(&self) -> Role {
        match self {
            Identity::User(user) => user.role(),
            Identity::Legacy => Role::Superuser,
        }
    }

    /// The real user id, if this principal has one.
    pub fn user_id(&self) -> Option<DbId> {
        match self {
            Identity::User(user) => Some(user.id),
            Identity::Legacy => None,
        }
    }

    pub fn is_superuser(&self) -> bool {
        self.role() == Role::Superuser
    }

    pub fn is_station_admin(&self) -> bool {
        self.role() == Role::StationAdmin
    }
}
