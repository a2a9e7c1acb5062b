/// Playback state types
use serde::{Deserialize, Serialize};

/// Coordinator playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    /// Nothing has been played yet
    #[default]
    Idle,

    /// Provider reports audio playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Explicitly stopped, current entry cleared
    Stopped,
}

/// State notification pushed by the playback collaborator
///
/// Mirrors the provider SDK's `player_state_changed` payload, reduced to the
/// fields the jukebox displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateUpdate {
    pub paused: bool,
    #[serde(default)]
    pub position_ms: u64,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub current_track_name: Option<String>,
}

impl PlayerStateUpdate {
    /// Progress through the current track in percent (0-100)
    pub fn progress_percent(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        (self.position_ms as f64 / self.duration_ms as f64 * 100.0).min(100.0)
    }
}
