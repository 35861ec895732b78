//! Error type for storage operations.

use scribe_core::ScribeError;

/// Errors from database access and note persistence.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(String),
    #[error("note not found: {0}")]
    NotFound(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<StorageError> for ScribeError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => ScribeError::NoteNotFound { id },
            other => ScribeError::Storage(other.to_string()),
        }
    }
}
