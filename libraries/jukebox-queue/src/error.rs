//! Error types for queue management and playback coordination

use jukebox_core::{EntryId, PlaybackFailure, QueueEntry};
use thiserror::Error;

/// Reasons a queue mutation was refused
///
/// Rejections are expected outcomes, not faults: the display text is the
/// notice shown to the user and the store is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueRejection {
    /// Submitter already has `limit` pending entries
    #[error("You can only have {limit} songs in the queue. Please wait for your songs to play.")]
    QuotaExceeded { limit: u32 },

    /// Track URI is already pending
    #[error("This song is already in the queue.")]
    DuplicateTrack { uri: String },

    /// No pending entry with that id
    #[error("Track not found in queue.")]
    NotFound { id: EntryId },

    /// Entry belongs to someone else
    #[error("You can only remove your own songs from the queue.")]
    NotOwner { id: EntryId },
}

/// Playback coordination errors
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Next-track requested with an empty queue
    #[error("No more tracks in queue")]
    NoMoreTracks,

    /// Command needs a current entry and there is none
    #[error("Nothing is playing")]
    NothingPlaying,

    /// Entry was pulled but the provider refused to play it
    ///
    /// The entry stays current unless `requeued` is set.
    #[error("Failed to play \"{track_name}\": {source}")]
    StartFailed {
        entry: Box<QueueEntry>,
        track_name: String,
        requeued: bool,
        source: PlaybackFailure,
    },

    /// Provider command failed
    #[error(transparent)]
    Playback(#[from] PlaybackFailure),
}

/// Result type for coordinator operations
pub type Result<T> = std::result::Result<T, CoordinatorError>;
