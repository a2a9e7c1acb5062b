/// Playback backend used when no provider token is configured
use async_trait::async_trait;
use jukebox_core::{PlaybackBackend, PlaybackFailure};
use jukebox_provider::NOT_READY_MESSAGE;

/// Refuses every command with the not-ready notice
///
/// Lets the queue be used (submit, remove, browse) before playback has been
/// set up.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableBackend;

impl UnavailableBackend {
    fn refuse() -> Result<(), PlaybackFailure> {
        Err(PlaybackFailure::not_ready(NOT_READY_MESSAGE))
    }
}

#[async_trait]
impl PlaybackBackend for UnavailableBackend {
    async fn play_track_at(&self, _uri: &str, _position_hint: usize) -> Result<(), PlaybackFailure> {
        Self::refuse()
    }

    async fn pause(&self) -> Result<(), PlaybackFailure> {
        Self::refuse()
    }

    async fn resume(&self) -> Result<(), PlaybackFailure> {
        Self::refuse()
    }

    async fn stop(&self) -> Result<(), PlaybackFailure> {
        Self::refuse()
    }

    async fn seek(&self, _position_ms: u64) -> Result<(), PlaybackFailure> {
        Self::refuse()
    }

    async fn set_volume(&self, _percent: u8) -> Result<(), PlaybackFailure> {
        Self::refuse()
    }
}
