//! API error types with JSON responses.
//!
//! Single failures render as `{"message": "..."}`, validation failures as
//! `{"errors": ["...", ...]}`.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use notes_core::ValidationErrors;
use notes_store::StoreError;
use serde::Serialize;

/// Message for every failed credential check.
pub const ACCESS_DENIED: &str = "Access Denied";

/// Message for a missing note.
pub const NOTE_NOT_FOUND: &str = "Note not found";

/// Message for a note owned by someone else.
pub const NOT_NOTE_OWNER: &str = "You're not authorized to update this note";

/// Generic 500 message used when error details are hidden.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Realm advertised in `WWW-Authenticate`.
const BASIC_CHALLENGE: &str = "Basic realm=\"notes\", charset=\"UTF-8\"";

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("{0}")]
    BadRequest(String),

    /// Field validation failed (400).
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Unauthorized (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Forbidden (403).
    #[error("{0}")]
    Forbidden(String),

    /// Internal server error (500).
    #[error("{0}")]
    Internal(String),

    /// Store error.
    #[error("storage error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) => Self::Validation(errors),
            StoreError::NoteNotFound(_) => Self::NotFound(NOTE_NOT_FOUND.to_string()),
            other => Self::Store(other),
        }
    }
}

impl ApiError {
    pub fn access_denied() -> Self {
        Self::Unauthorized(ACCESS_DENIED.to_string())
    }

    pub fn note_not_found() -> Self {
        Self::NotFound(NOTE_NOT_FOUND.to_string())
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) => match e {
                StoreError::IdentityNotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

/// JSON body for a single failure.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// JSON body for validation failures.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub errors: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Unhandled error");
        }

        match self {
            Self::Validation(errors) => (
                status,
                Json(ValidationResponse {
                    errors: errors.into_messages(),
                }),
            )
                .into_response(),
            Self::Unauthorized(message) => (
                status,
                [(header::WWW_AUTHENTICATE, BASIC_CHALLENGE)],
                Json(MessageResponse { message }),
            )
                .into_response(),
            other => (
                status,
                Json(MessageResponse {
                    message: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
