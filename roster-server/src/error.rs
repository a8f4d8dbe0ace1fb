//! Service-layer error type
//!
//! `ServiceError` carries storage failures out of the `db` layer so store code
//! can use `?`; handlers decide what the caller is allowed to see.

use shared::error::AppError;

use crate::BoxError;

/// Service-layer error
#[derive(Debug)]
pub enum ServiceError {
    /// Database or infrastructure error (logged, never shown to the caller)
    Db(BoxError),
}

impl ServiceError {
    /// Log the infrastructure error with its full detail and answer with `fallback`.
    pub fn into_app_error_or(self, fallback: AppError) -> AppError {
        match self {
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, code = %fallback.code, "Service database error");
                fallback
            }
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Db(e) => write!(f, "database error: {e}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
