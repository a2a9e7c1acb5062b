//! Volume preference
//!
//! The level is a 0-100 percentage handed to the provider as-is. Muting
//! sends 0 but keeps the level so unmuting restores it.

use jukebox_core::{storage::VOLUME_KEY, KeyValueStore};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Level applied when nothing has been saved yet
pub const DEFAULT_VOLUME: u8 = 50;

/// Persisted volume level plus mute flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumePreference {
    level: u8,
    #[serde(default)]
    muted: bool,
}

impl VolumePreference {
    /// Create a preference at `level` (clamped to 100)
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set the level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Level the user chose, ignoring mute
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn mute(&mut self) {
        self.muted = true;
    }

    pub fn unmute(&mut self) {
        self.muted = false;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level to send to the provider: 0 while muted
    pub fn effective_level(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.level
        }
    }

    /// Load from storage, falling back to [`DEFAULT_VOLUME`]
    ///
    /// Accepts either the JSON form or a bare number.
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        match storage.get(VOLUME_KEY) {
            Ok(Some(raw)) => {
                if let Ok(pref) = serde_json::from_str::<Self>(&raw) {
                    return Self::new(pref.level).with_muted(pref.muted);
                }
                match raw.trim().parse::<u8>() {
                    Ok(level) => Self::new(level),
                    Err(_) => {
                        warn!(value = %raw, "Ignoring unreadable volume preference");
                        Self::default()
                    }
                }
            }
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(error = %e, "Failed to load volume preference");
                Self::default()
            }
        }
    }

    /// Persist to storage; failures are logged
    pub fn save(&self, storage: &dyn KeyValueStore) {
        let result = serde_json::to_string(self)
            .map_err(jukebox_core::JukeboxError::from)
            .and_then(|json| storage.set(VOLUME_KEY, &json));

        if let Err(e) = result {
            warn!(error = %e, "Failed to save volume preference");
        }
    }

    fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }
}

impl Default for VolumePreference {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}
