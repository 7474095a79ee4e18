use std::env;
use std::str::FromStr;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::DbInfraError;

const DEFAULT_POOL_MAX: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_STARTUP_MAX_ATTEMPTS: u32 = 10;
const DEFAULT_STARTUP_RETRY_INTERVAL_MS: u64 = 5_000;

/// Database engine, detected from the connection string scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    pub fn from_url(url: &str) -> Result<Self, DbInfraError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(DbKind::Postgres)
        } else if url.starts_with("sqlite::memory:") || url.contains("mode=memory") {
            Ok(DbKind::SqliteMemory)
        } else if url.starts_with("sqlite:") {
            Ok(DbKind::SqliteFile)
        } else {
            Err(DbInfraError::config(format!(
                "unsupported connection string scheme: '{}'",
                crate::sanitize_db_url(url)
            )))
        }
    }

    /// Engine name for logging
    pub fn engine(&self) -> &'static str {
        match self {
            DbKind::Postgres => "postgresql",
            DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
        }
    }
}

/// Connection settings for the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub url: String,
    pub kind: DbKind,
    pub pool_max: u32,
    pub acquire_timeout_ms: u64,
}

impl DbSettings {
    /// Build settings for an explicit connection string with default pool sizing.
    pub fn from_url(url: impl Into<String>) -> Result<Self, DbInfraError> {
        let url = url.into();
        let kind = DbKind::from_url(&url)?;
        Ok(Self {
            url,
            kind,
            pool_max: DEFAULT_POOL_MAX,
            acquire_timeout_ms: DEFAULT_ACQUIRE_TIMEOUT_MS,
        })
    }

    /// Private in-memory SQLite database (tests and local experiments).
    pub fn sqlite_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            kind: DbKind::SqliteMemory,
            pool_max: 1,
            acquire_timeout_ms: DEFAULT_ACQUIRE_TIMEOUT_MS,
        }
    }

    /// Read settings from the environment.
    ///
    /// `DATABASE_URL` wins when set. Otherwise the URL is composed from
    /// `POSTGRES_HOST`, `POSTGRES_PORT`, `POSTGRES_DB`, `POSTGRES_USER` and
    /// `POSTGRES_PASSWORD`.
    pub fn from_env() -> Result<Self, DbInfraError> {
        let url = match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => postgres_url_from_parts()?,
        };
        let mut settings = Self::from_url(url)?;
        settings.pool_max = parse_var("INVENTORY_DB_POOL_MAX", DEFAULT_POOL_MAX)?;
        if settings.pool_max == 0 {
            return Err(DbInfraError::config("INVENTORY_DB_POOL_MAX must be at least 1"));
        }
        Ok(settings)
    }

    /// Effective pool ceiling: each in-memory SQLite connection is its own
    /// database, so those pools are pinned to a single connection.
    pub fn effective_pool_max(&self) -> u32 {
        match self.kind {
            DbKind::SqliteMemory => 1,
            _ => self.pool_max,
        }
    }
}

/// Bounded retry policy used while bringing the store up at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupPolicy {
    pub max_attempts: u32,
    pub retry_interval: Duration,
}

impl Default for StartupPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_STARTUP_MAX_ATTEMPTS,
            retry_interval: Duration::from_millis(DEFAULT_STARTUP_RETRY_INTERVAL_MS),
        }
    }
}

impl StartupPolicy {
    pub fn new(max_attempts: u32, retry_interval: Duration) -> Self {
        Self {
            max_attempts,
            retry_interval,
        }
    }

    /// Read `INVENTORY_STARTUP_MAX_ATTEMPTS` / `INVENTORY_STARTUP_RETRY_INTERVAL_MS`,
    /// falling back to 10 attempts spaced 5 seconds apart.
    pub fn from_env() -> Result<Self, DbInfraError> {
        let max_attempts =
            parse_var("INVENTORY_STARTUP_MAX_ATTEMPTS", DEFAULT_STARTUP_MAX_ATTEMPTS)?;
        if max_attempts == 0 {
            return Err(DbInfraError::config(
                "INVENTORY_STARTUP_MAX_ATTEMPTS must be at least 1",
            ));
        }
        let interval_ms = parse_var(
            "INVENTORY_STARTUP_RETRY_INTERVAL_MS",
            DEFAULT_STARTUP_RETRY_INTERVAL_MS,
        )?;
        Ok(Self::new(max_attempts, Duration::from_millis(interval_ms)))
    }
}

fn postgres_url_from_parts() -> Result<String, DbInfraError> {
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = must_var("POSTGRES_DB")?;
    let username = must_var("POSTGRES_USER")?;
    let password = must_var("POSTGRES_PASSWORD")?;

    Ok(format!(
        "postgresql://{}:{}@{host}:{port}/{db_name}",
        utf8_percent_encode(&username, NON_ALPHANUMERIC),
        utf8_percent_encode(&password, NON_ALPHANUMERIC),
    ))
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, DbInfraError> {
    env::var(name).map_err(|_| {
        DbInfraError::config(format!(
            "Required environment variable '{name}' is not set (or set DATABASE_URL)"
        ))
    })
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, DbInfraError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| DbInfraError::config(format!("{name} has an invalid value: '{raw}'"))),
        Err(_) => Ok(default),
    }
}
