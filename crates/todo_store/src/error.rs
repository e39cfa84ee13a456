//! Todo store error types.

use thiserror::Error;

/// Errors that can occur during todo store operations.
#[derive(Debug, Error)]
pub enum TodoStoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Transport-level failure talking to the remote backend.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote backend answered with a non-success status.
    #[error("Remote backend returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// A write succeeded at the transport level but returned no data.
    #[error("Remote backend returned no data for {operation}")]
    EmptyResponse { operation: &'static str },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while preparing the database file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TodoStoreError {
    /// Creates an empty response error.
    pub fn empty_response(operation: &'static str) -> Self {
        Self::EmptyResponse { operation }
    }
}

/// Result type for todo store operations.
pub type TodoStoreResult<T> = Result<T, TodoStoreError>;
