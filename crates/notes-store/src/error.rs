//! Error types for the storage layer.

use notes_core::{IdentityId, NoteId, ValidationErrors};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Connection(#[from] sqlx::Error),

    /// The record violates a field or uniqueness rule.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Identity not found.
    #[error("identity not found: {0}")]
    IdentityNotFound(IdentityId),

    /// Note not found.
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    /// Field messages if this is a validation failure.
    pub fn validation_messages(&self) -> Option<&[String]> {
        match self {
            Self::Validation(errors) => Some(errors.messages()),
            _ => None,
        }
    }
}
