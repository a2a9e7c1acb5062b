/// Queue entry domain type
use super::{EntryId, TrackRef, UserName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submission in the shared queue
///
/// Serialized in camelCase for the persisted snapshot. Snapshots written by
/// the legacy web client used `addedBy`/`addedAt` and are still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    /// Unique entry id
    pub id: EntryId,

    /// Track being queued
    pub track: TrackRef,

    /// Who submitted it
    #[serde(alias = "addedBy")]
    pub submitted_by: UserName,

    /// When it was accepted
    #[serde(alias = "addedAt")]
    pub submitted_at: DateTime<Utc>,

    /// Projected start time, absent until the estimator has run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_start_time: Option<DateTime<Utc>>,
}

impl QueueEntry {
    /// Create a new entry with a freshly generated id
    pub fn new(track: TrackRef, submitted_by: UserName, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::generate(submitted_at),
            track,
            submitted_by,
            submitted_at,
            estimated_start_time: None,
        }
    }

    /// Playable URI of the queued track
    pub fn uri(&self) -> &str {
        &self.track.uri
    }
}
