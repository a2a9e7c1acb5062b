/// ID types for jukebox entities
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random part appended to the timestamp
const SUFFIX_LEN: usize = 10;

/// Queue entry identifier
///
/// Opaque string. Generated ids are the submission time in base-36
/// milliseconds followed by a random base-36 suffix, so two submissions in
/// the same millisecond still get distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Wrap an existing id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id for a submission made at `at`
    pub fn generate(at: DateTime<Utc>) -> Self {
        let millis = at.timestamp_millis().max(0) as u64;
        let mut id = to_base36(millis);

        let mut rng = rand::thread_rng();
        id.extend((0..SUFFIX_LEN).map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char));

        Self(id)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn generated_ids_start_with_timestamp() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let id = EntryId::generate(at);
        assert!(id.as_str().starts_with("loyw3v28"));
        assert_eq!(id.as_str().len(), "loyw3v28".len() + SUFFIX_LEN);
    }

    #[test]
    fn same_millisecond_ids_differ() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let ids: HashSet<EntryId> = (0..500).map(|_| EntryId::generate(at)).collect();
        assert_eq!(ids.len(), 500);
    }
}
