use std::fmt;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;
use crate::auth::password::hash_password;

/// Which Content Store backend the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process memory; nothing survives a restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

/// The environment-configured fallback login.
///
/// Only the Argon2id hash of the password is kept after startup.
#[derive(Clone)]
pub struct FallbackCredentials {
    pub username: String,
    pub password_hash: String,
}

impl FallbackCredentials {
    /// Hash `password` and keep the pair.
    pub fn new(
        username: impl Into<String>,
        password: &str,
    ) -> Result<Self, argon2::password_hash::Error> {
        Ok(Self {
            username: username.into(),
            password_hash: hash_password(password)?,
        })
    }

    /// Read `ADMIN_FALLBACK_USERNAME` / `ADMIN_FALLBACK_PASSWORD`.
    ///
    /// Returns `None` when neither is set.
    ///
    /// # Panics
    ///
    /// Panics if only one of the pair is set, or if hashing fails.
    pub fn from_env() -> Option<Self> {
        let username = non_empty_env("ADMIN_FALLBACK_USERNAME");
        let password = non_empty_env("ADMIN_FALLBACK_PASSWORD");
        match (username, password) {
            (None, None) => None,
            (Some(username), Some(password)) => Some(
                Self::new(username, &password).expect("Failed to hash ADMIN_FALLBACK_PASSWORD"),
            ),
            _ => panic!("ADMIN_FALLBACK_USERNAME and ADMIN_FALLBACK_PASSWORD must be set together"),
        }
    }
}

impl fmt::Debug for FallbackCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackCredentials")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
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
    /// Content Store backend (default: `postgres`).
    pub store_backend: StoreBackend,
    /// Session token configuration.
    pub jwt: JwtConfig,
    /// Optional fallback login.
    pub fallback: Option<FallbackCredentials>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `STORE_BACKEND`           | `postgres`                 |
    /// | `ADMIN_FALLBACK_USERNAME` | unset                      |
    /// | `ADMIN_FALLBACK_PASSWORD` | unset                      |
    ///
    /// See [`JwtConfig::from_env`] for the session variables.
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

        let store_backend: StoreBackend = std::env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .parse()
            .unwrap_or_else(|e| panic!("STORE_BACKEND is invalid: {e}"));

        let jwt = JwtConfig::from_env();
        let fallback = FallbackCredentials::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_backend,
            jwt,
            fallback,
        }
    }
}
