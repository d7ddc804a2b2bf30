//! Authentication and station-scoping core.
//!
//! Two authentication methods coexist:
//!
//! - **Token sessions**: per-user credentials verified against an Argon2id
//!   hash; a successful login creates a `user_sessions` row keyed by an
//!   opaque random token carried in the `user_session` cookie.
//! - **Legacy shared password**: a single configuration-supplied secret
//!   predating user accounts. A match sets a flag cookie; no session row is
//!   ever created, and the resulting principal is superuser-equivalent with
//!   no per-user identity.
//!
//! Every operation takes the database pool and an explicit [`RequestContext`]
//! and returns `Result<T, AuthError>`. The guard extractors are the
//! fail-closed boundary: they convert any error into the negative result so
//! an infrastructure failure never authenticates anyone, while the typed
//! error keeps failures observable in tests and logs.

pub mod context;
pub mod identity;
pub mod password;
pub mod token;

use chrono::Utc;
use sqlx::PgPool;
use truckchecks_core::types::DbId;
use truckchecks_db::models::session::CreateSession;
use truckchecks_db::models::station::Station;
use truckchecks_db::models::user::User;
use truckchecks_db::repositories::{SessionRepo, StationRepo, UserRepo, UserStationRepo};

use crate::config::AuthConfig;
pub use context::RequestContext;
pub use identity::Identity;

/// Error type for the authentication core.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hash error: {0}")]
    PasswordHash(String),
}

/// A successful credential login: the session token to hand to the client
/// plus the authenticated user.
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// How the current station was resolved.
///
/// Callers use this to decide whether to (re)write the `preferred_station`
/// cookie: a value already bound to the session needs no cookie refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationSource {
    /// Bound on the session row.
    Session,
    /// Taken from the `preferred_station` cookie and re-validated.
    Cookie,
    /// The caller has exactly one accessible station; it was auto-selected.
    AutoSelected,
}

/// A resolved current station and where it came from.
#[derive(Debug, Clone)]
pub struct ResolvedStation {
    pub station: Station,
    pub source: StationSource,
}

/// The authentication/authorization core.
///
/// A zero-sized struct in the repository style: all methods take `&PgPool`
/// explicitly and hold no state of their own.
pub struct AuthService;

impl AuthService {
    /// Resolve the caller's identity from the request context.
    ///
    /// Token sessions win over the legacy flag. A token that resolves to an
    /// expired session, or to an inactive or deleted user, causes the stale
    /// row to be purged so the dangling token cannot be replayed; the legacy
    /// cookie is then still consulted as a fallback.
    pub async fn authenticate(
        pool: &PgPool,
        ctx: &RequestContext,
    ) -> Result<Option<Identity>, AuthError> {
        if let Some(token) = ctx.session_token.as_deref() {
            if let Some(session) = SessionRepo::find_by_token(pool, token).await? {
                if session.expires_at > Utc::now() {
                    if let Some(user) = UserRepo::find_by_id(pool, session.user_id).await? {
                        if user.is_active {
                            SessionRepo::touch_activity(pool, token).await?;
                            return Ok(Some(Identity::User(user)));
                        }
                    }
                }
                SessionRepo::delete_by_token(pool, token).await?;
                tracing::debug!(session_id = session.id, "purged stale session");
            }
        }

        if ctx.legacy_login {
            return Ok(Some(Identity::Legacy));
        }

        Ok(None)
    }

    /// Verify credentials and open a new token session.
    ///
    /// Returns `None` on any mismatch -- unknown username, wrong password,
    /// or inactive account -- so the caller cannot learn which field was
    /// wrong. A database failure while inserting the session row after a
    /// successful credential check is a hard error: login must never report
    /// success without a persisted session row to validate later.
    pub async fn login(
        pool: &PgPool,
        auth: &AuthConfig,
        username: &str,
        supplied_password: &str,
        ctx: &RequestContext,
    ) -> Result<Option<LoginOutcome>, AuthError> {
        let Some(user) = UserRepo::find_by_username(pool, username).await? else {
            return Ok(None);
        };
        if !user.is_active {
            return Ok(None);
        }

        let valid = password::verify_password(supplied_password, &user.password_hash)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
        if !valid {
            tracing::info!(user_id = user.id, "failed login attempt");
            return Ok(None);
        }

        let session_token = token::generate_session_token();
        let expires_at = Utc::now() + chrono::Duration::days(auth.session_expiry_days);

        let session = SessionRepo::create(
            pool,
            &CreateSession {
                user_id: user.id,
                session_token: session_token.clone(),
                expires_at,
                ip_address: ctx.ip_address.clone(),
                user_agent: ctx.user_agent.clone(),
            },
        )
        .await?;

        UserRepo::record_login(pool, user.id).await?;

        tracing::info!(user_id = user.id, session_id = session.id, "user logged in");
        Ok(Some(LoginOutcome {
            token: session_token,
            user,
        }))
    }

    /// Check a supplied password against the legacy shared secret.
    ///
    /// Returns false when no legacy secret is configured. This path never
    /// creates a session row; the caller's only persistence is the flag
    /// cookie it sets on success.
    pub fn verify_legacy(auth: &AuthConfig, supplied_password: &str) -> bool {
        match auth.legacy_password.as_deref() {
            Some(secret) => token::verify_legacy_secret(supplied_password, secret),
            None => false,
        }
    }

    /// The caller's accessible stations, ordered by name.
    ///
    /// Superusers and the legacy principal see every station; station
    /// admins see exactly their `user_stations` assignments. This is the
    /// single authorization boundary for station-scoped handlers.
    pub async fn user_stations(
        pool: &PgPool,
        identity: &Identity,
    ) -> Result<Vec<Station>, AuthError> {
        if identity.role().can_access_all_stations() {
            return Ok(StationRepo::list_all(pool).await?);
        }
        match identity.user_id() {
            Some(user_id) => Ok(StationRepo::list_for_user(pool, user_id).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Whether the caller may act on the given station.
    pub async fn has_station_access(
        pool: &PgPool,
        identity: &Identity,
        station_id: DbId,
    ) -> Result<bool, AuthError> {
        if identity.role().can_access_all_stations() {
            return Ok(StationRepo::find_by_id(pool, station_id).await?.is_some());
        }
        match identity.user_id() {
            Some(user_id) => Ok(UserStationRepo::is_assigned(pool, user_id, station_id).await?),
            None => Ok(false),
        }
    }

    /// Select the caller's current station.
    ///
    /// Returns false (with no state change) when the station is not in the
    /// caller's accessible set. For token sessions the selection is also
    /// persisted on the session row; the legacy principal has no session
    /// row, so its selection lives only in the `preferred_station` cookie
    /// the handler writes.
    pub async fn set_current_station(
        pool: &PgPool,
        identity: &Identity,
        ctx: &RequestContext,
        station_id: DbId,
    ) -> Result<bool, AuthError> {
        if !Self::has_station_access(pool, identity, station_id).await? {
            return Ok(false);
        }

        if let (Identity::User(_), Some(session_token)) = (identity, ctx.session_token.as_deref())
        {
            SessionRepo::set_station(pool, session_token, station_id).await?;
        }

        Ok(true)
    }

    /// Resolve the caller's current station. First match wins:
    ///
    /// 1. the station bound on the session row;
    /// 2. the `preferred_station` cookie, re-validated through
    ///    [`Self::set_current_station`] so a stale or inaccessible cookie is
    ///    silently ignored rather than trusted;
    /// 3. auto-selection when exactly one station is accessible, so
    ///    single-station deployments need no selection UI at all;
    /// 4. nothing.
    pub async fn current_station(
        pool: &PgPool,
        identity: &Identity,
        ctx: &RequestContext,
    ) -> Result<Option<ResolvedStation>, AuthError> {
        if let (Identity::User(_), Some(session_token)) = (identity, ctx.session_token.as_deref())
        {
            if let Some(session) = SessionRepo::find_by_token(pool, session_token).await? {
                if let Some(station_id) = session.station_id {
                    if let Some(station) = StationRepo::find_by_id(pool, station_id).await? {
                        return Ok(Some(ResolvedStation {
                            station,
                            source: StationSource::Session,
                        }));
                    }
                }
            }
        }

        if let Some(station_id) = ctx.preferred_station {
            if Self::set_current_station(pool, identity, ctx, station_id).await? {
                if let Some(station) = StationRepo::find_by_id(pool, station_id).await? {
                    return Ok(Some(ResolvedStation {
                        station,
                        source: StationSource::Cookie,
                    }));
                }
            }
        }

        let mut stations = Self::user_stations(pool, identity).await?;
        if stations.len() == 1 {
            let station = stations.remove(0);
            Self::set_current_station(pool, identity, ctx, station.id).await?;
            return Ok(Some(ResolvedStation {
                station,
                source: StationSource::AutoSelected,
            }));
        }

        Ok(None)
    }

    /// Tear down the caller's token session, if any.
    ///
    /// Cookie expiry (legacy flag and session token) is the handler's job;
    /// the `preferred_station` cookie is deliberately left alone so the next
    /// login on the same device keeps its station selection.
    pub async fn logout(pool: &PgPool, ctx: &RequestContext) -> Result<(), AuthError> {
        if let Some(session_token) = ctx.session_token.as_deref() {
            let deleted = SessionRepo::delete_by_token(pool, session_token).await?;
            if deleted {
                tracing::info!("session deleted on logout");
            }
        }
        Ok(())
    }
}
