/// Core error types for the notes server
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Result type alias using `NotesError`
pub type Result<T> = std::result::Result<T, NotesError>;

/// Core error type shared by storage and the procedure layer
#[derive(Error, Debug)]
pub enum NotesError {
    /// Malformed input, with field-level detail
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Uniqueness violation (duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl NotesError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<ValidationErrors> for NotesError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
