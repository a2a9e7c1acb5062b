/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jukebox_core::{InvalidNameError, PlaybackFailure};
use jukebox_provider::ProviderError;
use jukebox_queue::{CoordinatorError, QueueRejection};
use jukebox_storage::StorageError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Shown when a request needs a name and none has been entered
pub const NO_IDENTITY_MESSAGE: &str =
    "Please enter your username first before adding songs to the queue.";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Please enter your username first before adding songs to the queue.")]
    NoIdentity,

    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),

    #[error(transparent)]
    Rejected(#[from] QueueRejection),

    #[error(transparent)]
    Playback(#[from] CoordinatorError),

    #[error("Search error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Search is not configured")]
    ProviderUnavailable,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn playback_status(failure: &PlaybackFailure) -> StatusCode {
    match failure {
        PlaybackFailure::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
        PlaybackFailure::Rejected { .. } | PlaybackFailure::Network(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::NoIdentity => (StatusCode::UNAUTHORIZED, NO_IDENTITY_MESSAGE.to_string()),
            ServerError::InvalidName(ref e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ServerError::Rejected(ref rejection) => {
                let status = match rejection {
                    QueueRejection::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
                    QueueRejection::DuplicateTrack { .. } => StatusCode::CONFLICT,
                    QueueRejection::NotFound { .. } => StatusCode::NOT_FOUND,
                    QueueRejection::NotOwner { .. } => StatusCode::FORBIDDEN,
                };
                (status, rejection.to_string())
            }
            ServerError::Playback(ref e) => {
                let status = match e {
                    CoordinatorError::NoMoreTracks | CoordinatorError::NothingPlaying => {
                        StatusCode::CONFLICT
                    }
                    CoordinatorError::StartFailed { source, .. } => playback_status(source),
                    CoordinatorError::Playback(failure) => playback_status(failure),
                };
                (status, e.to_string())
            }
            ServerError::Provider(ref e) => {
                tracing::warn!(error = %e, "Provider request failed");
                let status = match e {
                    ProviderError::AuthRequired | ProviderError::NotReady(_) => {
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, e.to_string())
            }
            ServerError::ProviderUnavailable => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
