//! Error types for the provider Web API client.

use jukebox_core::PlaybackFailure;
use thiserror::Error;

/// Message shown while no playback device has registered yet.
pub const NOT_READY_MESSAGE: &str = "Player not ready. Please wait...";

/// Errors that can occur when talking to the provider's Web API.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider returned an error response
    #[error("Provider error ({status}): {message}")]
    Api { status: u16, message: String },

    /// No access token configured, or the provider rejected it
    #[error("Authentication required")]
    AuthRequired,

    /// No playback device to send commands to
    #[error("{0}")]
    NotReady(String),

    /// Invalid API base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse provider response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl From<ProviderError> for PlaybackFailure {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotReady(message) => PlaybackFailure::NotReady(message),
            ProviderError::Api { status, message } => PlaybackFailure::Rejected { status, message },
            ProviderError::AuthRequired => PlaybackFailure::Rejected {
                status: 401,
                message: "Authentication required".to_string(),
            },
            ProviderError::Request(e) => PlaybackFailure::Network(e.to_string()),
            other @ (ProviderError::InvalidUrl(_) | ProviderError::ParseError(_)) => {
                PlaybackFailure::Network(other.to_string())
            }
        }
    }
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
