//! Configuration and result types for the queue

use jukebox_core::QueueEntry;
use serde::{Deserialize, Serialize};

/// Default per-user cap on simultaneous pending submissions
pub const MAX_PER_USER: u32 = 3;

/// Assumed length of every track for wait-time estimates (seconds)
pub const DEFAULT_TRACK_DURATION_SECS: u64 = 180;

/// Configuration for the queue store and coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum pending entries per user (default: 3)
    pub max_per_user: u32,

    /// Fixed duration assumed for every track (default: 180)
    pub track_duration_secs: u64,

    /// Put a pulled entry back at the head when the provider refuses to
    /// play it (default: false)
    pub requeue_on_playback_failure: bool,
}

impl QueueConfig {
    /// Estimator step as a chrono duration
    pub fn track_duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.track_duration_secs as i64)
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_per_user: MAX_PER_USER,
            track_duration_secs: DEFAULT_TRACK_DURATION_SECS,
            requeue_on_playback_failure: false,
        }
    }
}

/// Successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    /// The stored entry, with its start estimate
    pub entry: QueueEntry,
    /// Confirmation notice, e.g. `"Song A" added to queue!`
    pub message: String,
}

/// Successful removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub entry: QueueEntry,
    pub message: String,
}
