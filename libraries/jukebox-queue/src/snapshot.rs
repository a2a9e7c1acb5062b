//! Persisted form of the queue store

use jukebox_core::{QueueEntry, UserName};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Everything the queue store writes under `jukebox_queue`
///
/// `userSongs` is a list of `[name, count]` pairs. Missing fields load as
/// empty so a partial snapshot still restores what it can, and a single
/// malformed entry (e.g. a blank `addedBy`) is skipped with a warning
/// instead of failing the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSnapshot {
    #[serde(default, deserialize_with = "skip_bad_entries")]
    pub queue: Vec<QueueEntry>,

    #[serde(default, deserialize_with = "skip_bad_current")]
    pub current_track: Option<QueueEntry>,

    #[serde(default, deserialize_with = "skip_bad_counters")]
    pub user_songs: Vec<(UserName, u32)>,
}

fn skip_bad_entries<'de, D>(deserializer: D) -> Result<Vec<QueueEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable queue entry");
                None
            }
        })
        .collect())
}

fn skip_bad_current<'de, D>(deserializer: D) -> Result<Option<QueueEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match serde_json::from_value(value) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!(error = %e, "Dropping unreadable current entry");
                Ok(None)
            }
        },
    }
}

fn skip_bad_counters<'de, D>(deserializer: D) -> Result<Vec<(UserName, u32)>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}

impl QueueSnapshot {
    /// Counters as a map, dropping zero entries
    pub fn counters(&self) -> BTreeMap<UserName, u32> {
        self.user_songs
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(user, count)| (user.clone(), *count))
            .collect()
    }
}
