use thiserror::Error;

/// Top-level error type for the Scribe system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define their
/// own error types and implement `From<SubsystemError> for ScribeError` so
/// that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScribeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Dictation error: {0}")]
    Dictation(String),

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Rewrite error: {0}")]
    Rewrite(String),

    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ScribeError {
    fn from(err: toml::de::Error) -> Self {
        ScribeError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ScribeError {
    fn from(err: toml::ser::Error) -> Self {
        ScribeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ScribeError {
    fn from(err: serde_json::Error) -> Self {
        ScribeError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Scribe operations.
pub type Result<T> = std::result::Result<T, ScribeError>;
