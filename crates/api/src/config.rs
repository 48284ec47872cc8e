use std::str::FromStr;

use axum::http::HeaderValue;
use yatube_core::pagination::PAGE_SIZE;
use yatube_core::posts::DEFAULT_TITLE_MAX_CHARS;

use crate::auth::jwt::JwtConfig;

/// Failure while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
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
    /// PostgreSQL URL. When unset the server keeps data in memory.
    pub database_url: Option<String>,
    /// Path anonymous users are redirected to (default: `/auth/login/`).
    pub login_url: String,
    /// Posts per feed page (default: `10`).
    pub posts_per_page: i64,
    /// Characters of post text used as the detail page title (default: `30`).
    pub title_max_chars: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
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
    /// | `DATABASE_URL`         | unset (in-memory store)    |
    /// | `LOGIN_URL`            | `/auth/login/`             |
    /// | `POSTS_PER_PAGE`       | `10`                       |
    /// | `TITLE_MAX_CHARS`      | `30`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = parse_var("PORT", 3000)?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: origin.clone(),
                reason: e.to_string(),
            })?;
        }

        let request_timeout_secs: u64 = parse_var("REQUEST_TIMEOUT_SECS", 30)?;

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.is_empty());

        let login_url = std::env::var("LOGIN_URL").unwrap_or_else(|_| "/auth/login/".into());

        let posts_per_page: i64 = parse_var("POSTS_PER_PAGE", PAGE_SIZE)?;
        if posts_per_page < 1 {
            return Err(ConfigError::Invalid {
                var: "POSTS_PER_PAGE",
                value: posts_per_page.to_string(),
                reason: "must be at least 1".into(),
            });
        }

        let title_max_chars: usize = parse_var("TITLE_MAX_CHARS", DEFAULT_TITLE_MAX_CHARS)?;

        let jwt = JwtConfig::from_env()?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            login_url,
            posts_per_page,
            title_max_chars,
            jwt,
        })
    }
}

/// Read `var` and parse it, falling back to `default` when unset.
pub(crate) fn parse_var<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                var,
                value,
                reason: e.to_string(),
            })
        }
        Err(_) => Ok(default),
    }
}
