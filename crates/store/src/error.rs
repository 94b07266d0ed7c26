//! Store error type.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded migrations failed to apply.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored body is not a JSON object.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The backend cannot serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
