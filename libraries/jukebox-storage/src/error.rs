/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backing file could not be parsed
    #[error("Corrupt store at {path}: {reason}")]
    Corrupt { path: String, reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for jukebox_core::JukeboxError {
    fn from(err: StorageError) -> Self {
        jukebox_core::JukeboxError::storage(err.to_string())
    }
}
