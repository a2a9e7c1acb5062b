/// Provider track metadata
use serde::{Deserialize, Serialize};

/// Immutable reference to a track in the provider's catalog
///
/// Field names follow the provider's JSON so search results deserialize
/// directly. The queue never mutates a `TrackRef`; entries carry a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    /// Provider track id
    #[serde(default)]
    pub id: String,

    /// Playable URI, the identity used for duplicate detection
    pub uri: String,

    /// Track title
    pub name: String,

    /// Performing artists
    #[serde(default)]
    pub artists: Vec<ArtistRef>,

    /// Album the track belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<AlbumRef>,

    /// Track length as reported by the provider (not used for estimates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl TrackRef {
    /// Create a bare track reference
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            uri: uri.into(),
            name: name.into(),
            artists: Vec::new(),
            album: None,
            duration_ms: None,
        }
    }

    /// Add an artist (builder style)
    #[must_use]
    pub fn with_artist(mut self, name: impl Into<String>) -> Self {
        self.artists.push(ArtistRef {
            id: String::new(),
            name: name.into(),
        });
        self
    }

    /// Artist names joined for display, e.g. `"Daft Punk, Pharrell Williams"`
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Artist reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

/// Album reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// Cover art reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_provider_track_json() {
        let json = r#"{
            "id": "4uLU6hMCjMI75M1A2tKUQC",
            "uri": "spotify:track:4uLU6hMCjMI75M1A2tKUQC",
            "name": "Never Gonna Give You Up",
            "popularity": 77,
            "artists": [{"id": "0gxyHStUsqpMadRV0Di1Qt", "name": "Rick Astley"}],
            "album": {
                "id": "6XhjNHCyCDyyGJRM5mg40G",
                "name": "Whenever You Need Somebody",
                "images": [{"url": "https://i.scdn.co/image/abc", "width": 640, "height": 640}],
                "artists": []
            },
            "duration_ms": 213573,
            "external_urls": {"spotify": "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"}
        }"#;

        let track: TrackRef = serde_json::from_str(json).unwrap();
        assert_eq!(track.name, "Never Gonna Give You Up");
        assert_eq!(track.artist_names(), "Rick Astley");
        assert_eq!(track.duration_ms, Some(213_573));
        assert_eq!(track.album.unwrap().images.len(), 1);
    }

    #[test]
    fn artist_names_joined() {
        let track = TrackRef::new("spotify:track:x", "Get Lucky")
            .with_artist("Daft Punk")
            .with_artist("Pharrell Williams");
        assert_eq!(track.artist_names(), "Daft Punk, Pharrell Williams");
    }
}
