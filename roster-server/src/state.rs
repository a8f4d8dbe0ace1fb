//! Application state for roster-server

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use crate::BoxError;
use crate::config::{Config, StorageBackend};
use crate::db::{EmployeeStore, MemoryEmployeeStore, PgEmployeeStore};

/// Shared application state
///
/// The storage handle is built once in `main` and handed to every handler
/// through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Employee store used by `/search`
    pub employees: Arc<dyn EmployeeStore>,
}

impl AppState {
    /// Wrap an already constructed store
    pub fn new(store: impl EmployeeStore + 'static) -> Self {
        Self {
            employees: Arc::new(store),
        }
    }

    /// Build the state described by `config`
    ///
    /// For PostgreSQL this connects the pool and runs the schema migrations.
    pub async fn from_config(config: &Config) -> Result<Self, BoxError> {
        match &config.storage {
            StorageBackend::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .acquire_timeout(Duration::from_secs(5))
                    .connect_with(config.database.connect_options()?)
                    .await?;
                tracing::info!("Database connected");

                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Database schema synchronized");

                Ok(Self::new(PgEmployeeStore::new(pool)))
            }
            StorageBackend::Memory { seed_file } => {
                let store = match seed_file {
                    Some(path) => MemoryEmployeeStore::from_seed_file(path).await?,
                    None => MemoryEmployeeStore::default(),
                };
                tracing::warn!("Using in-memory employee store");
                Ok(Self::new(store))
            }
        }
    }
}
