use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Clients match on these —
// never on the human-readable message string.

/// Stable error code constants.
///
/// Clients should match on `code` from `{"code": "NOT_FOUND", "message": "..."}`.
/// Codes never change; messages may be reworded.
pub mod error_code {
    pub const NO_FIELDS: &str = "NO_FIELDS";
    pub const INVALID_FILTER: &str = "INVALID_FILTER";
    pub const DUPLICATE_KEY: &str = "DUPLICATE_KEY";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type used across all modules.
///
/// Each variant maps to a stable error code (see [`error_code`]) and an
/// HTTP status code. The JSON response always includes both:
///
/// ```json
/// {"code": "NOT_FOUND", "message": "organization 'acme' not found"}
/// ```
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A partial update request supplied zero fields. HTTP 400.
    #[error("{0}")]
    NoFields(String),

    /// Search filters contradict each other. HTTP 400.
    #[error("{0}")]
    InvalidFilter(String),

    /// Natural-key collision on create. HTTP 409.
    #[error("{0}")]
    DuplicateKey(String),

    /// Resource does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// An access policy rejected the request. HTTP 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Storage backend failure. HTTP 500.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NoFields(_) => error_code::NO_FIELDS,
            ServiceError::InvalidFilter(_) => error_code::INVALID_FILTER,
            ServiceError::DuplicateKey(_) => error_code::DUPLICATE_KEY,
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Unauthorized(_) => error_code::UNAUTHENTICATED,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NoFields(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            ServiceError::DuplicateKey(_) => StatusCode::CONFLICT,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
