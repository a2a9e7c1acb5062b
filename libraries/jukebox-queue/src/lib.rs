//! Jukebox Queue - Shared Queue Management
//!
//! The stateful heart of the jukebox. Several people at one station submit
//! tracks to a single FIFO queue; this crate keeps that queue fair and
//! drives playback from it.
//!
//! This crate provides:
//! - [`IdentityRegister`]: who is submitting from this station
//! - [`QueueStore`]: pending entries, the current entry, per-user quotas
//! - Wait-time estimates ([`estimate_start_times`], [`wait_label`])
//! - [`PlaybackCoordinator`]: play/pause/next/stop over an external
//!   [`PlaybackBackend`](jukebox_core::PlaybackBackend)
//!
//! # Architecture
//!
//! No audio is decoded here and no network is touched. Storage, time, and
//! the playback provider are injected as traits from `jukebox-core`, so the
//! same code runs against a JSON file and a Web API in the server and
//! against in-memory fakes in tests.
//!
//! # Example
//!
//! ```rust
//! use jukebox_core::{SystemClock, TrackRef, UserName};
//! use jukebox_queue::{QueueConfig, QueueStore};
//! use jukebox_storage::MemoryStore;
//! use std::sync::Arc;
//!
//! let queue = QueueStore::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(SystemClock),
//!     QueueConfig::default(),
//! );
//!
//! let alice = UserName::parse("alice").unwrap();
//! let accepted = queue
//!     .enqueue(TrackRef::new("spotify:track:1", "Song A"), &alice)
//!     .unwrap();
//!
//! assert_eq!(accepted.message, "\"Song A\" added to queue!");
//! assert_eq!(queue.remaining_quota(&alice), 2);
//!
//! let playing = queue.pull_next().unwrap();
//! assert_eq!(playing.track.name, "Song A");
//! assert_eq!(queue.remaining_quota(&alice), 3);
//! ```

pub mod coordinator;
pub mod error;
pub mod estimate;
pub mod events;
pub mod identity;
pub mod queue;
pub mod snapshot;
pub mod types;
pub mod volume;

pub use coordinator::{PlaybackCoordinator, ToggleOutcome, EMPTY_QUEUE_NOTICE, MAX_PENDING_EVENTS};
pub use error::{CoordinatorError, QueueRejection, Result};
pub use estimate::{estimate_start_times, wait_label};
pub use events::JukeboxEvent;
pub use identity::{IdentityRegister, GUEST_NAME};
pub use queue::QueueStore;
pub use snapshot::QueueSnapshot;
pub use types::{Accepted, QueueConfig, Removed, DEFAULT_TRACK_DURATION_SECS, MAX_PER_USER};
pub use volume::{VolumePreference, DEFAULT_VOLUME};
