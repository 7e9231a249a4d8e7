/// Storage-specific errors
use notes_core::UserId;
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violated
    #[error("{0} already exists")]
    Conflict(String),

    /// A stored value could not be mapped back to a domain type
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Migration error
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Map a unique-constraint violation to `Conflict`, pass anything else through
    pub(crate) fn from_insert(err: sqlx::Error, entity: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Conflict(entity.to_string())
            }
            _ => Self::Database(err),
        }
    }

    /// Map a foreign-key violation on `notes.author_id` to a missing `User`
    pub(crate) fn from_note_insert(err: sqlx::Error, author_id: &UserId) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                Self::not_found("User", author_id.as_str())
            }
            _ => Self::from_insert(err, "Note"),
        }
    }
}

impl From<StorageError> for notes_core::NotesError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => Self::NotFound { entity, id },
            StorageError::Conflict(entity) => Self::Conflict(format!("{entity} already exists")),
            other => Self::storage(other.to_string()),
        }
    }
}
