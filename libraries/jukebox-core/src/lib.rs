//! Jukebox Core
//!
//! Platform-agnostic core types, traits, and error handling for the shared
//! jukebox queue.
//!
//! This crate provides the building blocks used by the queue engine, the
//! storage adapters, the provider client, and the server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `TrackRef`, `UserName`, `EntryId`, `QueueEntry`
//! - **Core Traits**: `KeyValueStore`, `PlaybackBackend`, `Clock`
//! - **Error Handling**: `JukeboxError`, `InvalidNameError`, `PlaybackFailure`
//!
//! # Example
//!
//! ```rust
//! use jukebox_core::types::{TrackRef, UserName};
//!
//! let user = UserName::parse("  alice ").unwrap();
//! assert_eq!(user.as_str(), "alice");
//!
//! let track = TrackRef::new("spotify:track:1", "Song A");
//! assert_eq!(track.uri, "spotify:track:1");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{InvalidNameError, JukeboxError, PlaybackFailure, Result};
pub use storage::KeyValueStore;
pub use traits::{Clock, ManualClock, PlaybackBackend, SystemClock};

pub use types::{
    AlbumRef, ArtistRef, EntryId, ImageRef, PlayerStateUpdate, PlayerStatus, QueueEntry,
    TrackRef, UserName,
};
