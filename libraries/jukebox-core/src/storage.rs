//! Key-value storage trait
//!
//! Durable, synchronous string storage scoped to one jukebox installation.
//! The queue snapshot, the current identity, and the volume preference each
//! live under their own key so they can be restored independently.

use crate::error::Result;

/// Storage key for the serialized queue snapshot
pub const QUEUE_KEY: &str = "jukebox_queue";

/// Storage key for the current submitting user
pub const CURRENT_USER_KEY: &str = "jukebox_current_user";

/// Storage key for the volume preference
pub const VOLUME_KEY: &str = "jukebox_volume";

/// Synchronous key-value persistence
///
/// Values survive restarts and are cleared only by explicit removal.
/// Implementations must be safe to share between threads.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key succeeds
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
