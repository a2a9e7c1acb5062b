//! Jukebox events for UI updates

use jukebox_core::PlayerStatus;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback coordinator
///
/// Collected internally and handed out by
/// [`PlaybackCoordinator::drain_events`](crate::PlaybackCoordinator::drain_events).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum JukeboxEvent {
    /// Playback status changed
    StateChanged { state: PlayerStatus },

    /// An entry started playing
    NowPlaying {
        entry_id: String,
        track_name: String,
        submitted_by: String,
    },

    /// Pending queue length changed
    QueueChanged { length: usize },

    /// Position reported by the provider
    PositionUpdate { position_ms: u64, duration_ms: u64 },

    /// Volume or mute changed
    VolumeChanged { level: u8, is_muted: bool },

    /// Informational notice for the user
    Notice { message: String },

    /// Error notice for the user
    Error { message: String },
}
