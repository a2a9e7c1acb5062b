//! Jukebox Storage
//!
//! Key-value persistence backing the queue snapshot, the current identity,
//! and the volume preference.
//!
//! Two implementations of [`jukebox_core::KeyValueStore`]:
//! - [`MemoryStore`]: volatile, for tests and throwaway sessions
//! - [`FileStore`]: one JSON file, survives restarts
//!
//! # Example
//!
//! ```rust,no_run
//! use jukebox_core::{storage::QUEUE_KEY, KeyValueStore};
//! use jukebox_storage::FileStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileStore::open("./data/jukebox.json")?;
//! store.set(QUEUE_KEY, "{}")?;
//! assert_eq!(store.get(QUEUE_KEY)?.as_deref(), Some("{}"));
//! # Ok(())
//! # }
//! ```

mod error;
mod file;
mod memory;

pub use error::{Result, StorageError};
pub use file::FileStore;
pub use memory::MemoryStore;
