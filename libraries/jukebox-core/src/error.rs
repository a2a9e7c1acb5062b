/// Core error types for the jukebox
use thiserror::Error;

/// Result type alias using `JukeboxError`
pub type Result<T> = std::result::Result<T, JukeboxError>;

/// Core error type for the jukebox
#[derive(Error, Debug)]
pub enum JukeboxError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl JukeboxError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// A display name was empty after trimming
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Please enter a name")]
pub struct InvalidNameError;

/// Failure reported by the external playback collaborator
///
/// The message is the collaborator's own and is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackFailure {
    /// Player or device is not ready to accept commands
    #[error("{0}")]
    NotReady(String),

    /// Provider rejected the command
    #[error("Playback rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Provider could not be reached
    #[error("Network error: {0}")]
    Network(String),
}

impl PlaybackFailure {
    /// Create a not-ready failure
    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }
}
