//! Unified error system for Roster
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Error type with code and message
//! - [`ErrorBody`]: The `{ "error": ... }` body sent to callers
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::search_failed();
//! assert_eq!(err.code, ErrorCode::EmployeeSearchFailed);
//! assert_eq!(ErrorBody::from(&err).error, "Hubo un problema con la búsqueda.");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody, SEARCH_FAILED_MESSAGE};
