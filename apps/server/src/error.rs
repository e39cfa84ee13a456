//! Server error types.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("{0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Storage backend error.
    #[error("Database error: {0}")]
    Database(#[from] todo_store::TodoStoreError),
}

impl ServerError {
    /// Error for task text that is empty after trimming.
    pub fn empty_task() -> Self {
        Self::InvalidRequest("Task cannot be empty".to_string())
    }

    /// Error for a todo ID that matches nothing.
    pub fn todo_not_found() -> Self {
        Self::NotFound("Todo not found".to_string())
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let ServerError::Database(e) = &self {
            tracing::error!(error = %e, "Storage backend failure");
        }

        let body = json!({ "error": self.to_string() });

        (status, Json(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
