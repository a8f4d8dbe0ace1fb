//! Shared types for the Roster directory
//!
//! Wire and domain types used by both `roster-server` and `roster-client`:
//! the employee record, the search request body and the error vocabulary.

pub mod error;
pub mod models;
pub mod request;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use models::employee::{Employee, Role, Status};
pub use request::SearchRequest;
