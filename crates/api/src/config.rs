/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Authentication configuration (session lifetime, legacy secret, cookies).
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            auth: AuthConfig::from_env(),
        }
    }
}

/// Default session lifetime in days.
const DEFAULT_SESSION_EXPIRY_DAYS: i64 = 90;

/// Authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session row (and `user_session` cookie) lifetime in days (default: 90).
    pub session_expiry_days: i64,
    /// System-wide shared secret for legacy login. `None` disables the
    /// legacy path entirely.
    pub legacy_password: Option<String>,
    /// Database name, used to derive the legacy flag cookie name so two
    /// deployments on one host do not clobber each other's cookie.
    pub database_name: String,
}

impl AuthConfig {
    /// Load authentication configuration from environment variables.
    ///
    /// | Env Var               | Required | Default       |
    /// |-----------------------|----------|---------------|
    /// | `SESSION_EXPIRY_DAYS` | no       | `90`          |
    /// | `LEGACY_PASSWORD`     | no       | -- (disabled) |
    /// | `DATABASE_NAME`       | no       | `truckchecks` |
    pub fn from_env() -> Self {
        let session_expiry_days: i64 = std::env::var("SESSION_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_DAYS.to_string())
            .parse()
            .expect("SESSION_EXPIRY_DAYS must be a valid i64");

        let legacy_password = std::env::var("LEGACY_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty());

        let database_name =
            std::env::var("DATABASE_NAME").unwrap_or_else(|_| "truckchecks".into());

        Self {
            session_expiry_days,
            legacy_password,
            database_name,
        }
    }

    /// Name of the legacy "logged in" flag cookie (`logged_in_<db-name>`).
    pub fn legacy_cookie_name(&self) -> String {
        format!("logged_in_{}", self.database_name)
    }
}
