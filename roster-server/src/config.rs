//! Server configuration

use std::path::PathBuf;

use sqlx::postgres::PgConnectOptions;

use crate::BoxError;

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// Which employee store backs `/search`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL via sqlx (default)
    Postgres,
    /// In-process store, optionally seeded from a JSON file of employees
    Memory { seed_file: Option<PathBuf> },
}

/// Database connection settings (env: DB_HOST, DB_PORT, DB_NAME, DB_USER, DB_PASS)
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection URL (env: DATABASE_URL), takes precedence over the parts
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    /// Pool size (env: DB_MAX_CONNECTIONS)
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Build sqlx connect options from the URL or the individual parts
    pub fn connect_options(&self) -> Result<PgConnectOptions, BoxError> {
        if let Some(url) = &self.url {
            return Ok(url.parse::<PgConnectOptions>()?);
        }
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password))
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Storage backend (env: STORAGE = postgres | memory, SEED_FILE)
    pub storage: StorageBackend,
    /// Database settings, only read when `storage` is Postgres
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BoxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let storage = match var("STORAGE").as_deref() {
            None | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory {
                seed_file: var("SEED_FILE").map(PathBuf::from),
            },
            Some(other) => {
                return Err(format!("STORAGE must be 'postgres' or 'memory', got '{other}'").into());
            }
        };

        let url = var("DATABASE_URL");
        let require = |key: &str| -> Result<String, BoxError> {
            match var(key) {
                Some(v) => Ok(v),
                None if url.is_some() || storage != StorageBackend::Postgres => Ok(String::new()),
                None => Err(format!("{key} must be set (or provide DATABASE_URL)").into()),
            }
        };

        let database = DatabaseConfig {
            host: var("DB_HOST").unwrap_or_else(|| "localhost".into()),
            port: parse_or(var("DB_PORT"), "DB_PORT", 5432)?,
            name: require("DB_NAME")?,
            user: require("DB_USER")?,
            password: var("DB_PASS").unwrap_or_default(),
            max_connections: parse_or(var("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?,
            url,
        };

        Ok(Self {
            http_port: parse_or(var("HTTP_PORT"), "HTTP_PORT", DEFAULT_HTTP_PORT)?,
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            storage,
            database,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, BoxError>
where
    T: std::str::FromStr,
{
    match value {
        None => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| format!("{key} has an invalid value: '{v}'").into()),
    }
}
