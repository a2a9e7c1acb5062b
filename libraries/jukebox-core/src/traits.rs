/// Core traits for the jukebox
use crate::error::PlaybackFailure;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, PoisonError};

/// External playback collaborator
///
/// Implementers drive the streaming provider (Web API, playback SDK bridge,
/// or a test double). The jukebox never decodes audio itself.
///
/// Every command may fail asynchronously; failures carry the provider's
/// message so it can be shown to the user unchanged.
#[async_trait]
pub trait PlaybackBackend: Send + Sync {
    /// Start playing `uri`
    ///
    /// `position_hint` is the entry's position in the queue the track was
    /// taken from (0 for the head).
    async fn play_track_at(
        &self,
        uri: &str,
        position_hint: usize,
    ) -> Result<(), PlaybackFailure>;

    /// Pause the current track
    async fn pause(&self) -> Result<(), PlaybackFailure>;

    /// Resume the current track
    async fn resume(&self) -> Result<(), PlaybackFailure>;

    /// Stop playback entirely
    async fn stop(&self) -> Result<(), PlaybackFailure>;

    /// Seek within the current track
    async fn seek(&self, position_ms: u64) -> Result<(), PlaybackFailure>;

    /// Set output volume (0-100)
    async fn set_volume(&self, percent: u8) -> Result<(), PlaybackFailure>;
}

/// Source of the current time
///
/// Injected so wait-time estimates can be tested deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock to `instant`
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    /// Move the clock forward by `step`
    pub fn advance(&self, step: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += step;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
