//! Error types for ventnote-core persistence

use thiserror::Error;

/// Result type alias for counter store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised while reading or writing the durable counter store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
