//! Roster Client - HTTP client and search pipeline for roster-server
//!
//! - [`HttpClient`]: typed calls to `POST /search` and `GET /health`
//! - [`SearchPipeline`]: debounced, latest-wins search driven by keystrokes

pub mod config;
pub mod error;
pub mod http;
pub mod search;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use search::{
    DEFAULT_DEBOUNCE, SEARCH_ERROR_MESSAGE, SearchBackend, SearchPipeline, SearchView,
};

// Re-export shared types for convenience
pub use shared::models::{Employee, Role, Status};
