//! Domain types for the jukebox

mod entry;
mod ids;
mod playback_state;
mod track;
mod user;

pub use entry::QueueEntry;
pub use ids::EntryId;
pub use playback_state::{PlayerStateUpdate, PlayerStatus};
pub use track::{AlbumRef, ArtistRef, ImageRef, TrackRef};
pub use user::UserName;
