//! roster-server - employee directory search service
//!
//! Serves `POST /search`, a substring match on employee names backed by
//! PostgreSQL (or an in-process store for development and tests).

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod state;

pub use config::Config;
pub use state::AppState;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
