//! Error type for reporting queries.

use crate::services::metrics::record_error;
use service_core::error::AppError;
use thiserror::Error;

/// A reporting query failed.
///
/// `Display` is the caller-safe message for the operation; the driver error
/// is kept as the source and only ever written to the logs.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DataAccessError {
    operation: &'static str,
    message: &'static str,
    #[source]
    source: sqlx::Error,
}

impl DataAccessError {
    /// Log the driver error for `operation` and wrap it with `message`.
    pub fn new(operation: &'static str, message: &'static str, source: sqlx::Error) -> Self {
        tracing::error!(operation, error = %source, "Database error");
        record_error("database");
        Self {
            operation,
            message,
            source,
        }
    }

    /// Closure form of [`DataAccessError::new`] for `map_err`.
    pub fn wrap(
        operation: &'static str,
        message: &'static str,
    ) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::new(operation, message, source)
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl From<DataAccessError> for AppError {
    fn from(err: DataAccessError) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}
