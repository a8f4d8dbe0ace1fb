//! Data models
//!
//! Shared between roster-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.

pub mod employee;

// Re-exports
pub use employee::*;
