//! Provider Web API client.

use crate::error::{ProviderError, Result, NOT_READY_MESSAGE};
use async_trait::async_trait;
use jukebox_core::{PlaybackBackend, PlaybackFailure, TrackRef};
use reqwest::{Client, Method, Response};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// Production Web API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Result count used when searching without an explicit limit.
pub const DEFAULT_SEARCH_LIMIT: u8 = 24;

/// Largest page the search endpoint accepts.
const MAX_SEARCH_LIMIT: u8 = 50;

/// Connection settings for the Web API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebApiConfig {
    /// API root, without a trailing slash
    pub api_base_url: String,
    /// OAuth bearer token
    pub access_token: Option<String>,
    /// Playback device commands are sent to
    pub device_id: Option<String>,
}

impl WebApiConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            access_token: None,
            device_id: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }
}

impl Default for WebApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    tracks: Option<Page<TrackRef>>,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Client for the provider's player and search endpoints.
///
/// Implements [`PlaybackBackend`] so the coordinator can drive it directly.
/// Tokens and the device id can be swapped at runtime; requests never retry.
///
/// # Example
///
/// ```ignore
/// use jukebox_provider::{WebApiClient, WebApiConfig};
///
/// let config = WebApiConfig::default()
///     .with_token("BQD...")
///     .with_device("living-room");
/// let client = WebApiClient::new(config)?;
///
/// let tracks = client.search_tracks("daft punk", None).await?;
/// println!("Found {} tracks", tracks.len());
/// ```
pub struct WebApiClient {
    http: Client,
    config: Arc<RwLock<WebApiConfig>>,
}

impl WebApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: WebApiConfig) -> Result<Self> {
        if config.api_base_url.is_empty() {
            return Err(ProviderError::InvalidUrl("URL cannot be empty".into()));
        }

        let api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        let parsed =
            Url::parse(&api_base_url).map_err(|e| ProviderError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProviderError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(format!("Jukebox/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(WebApiConfig {
                api_base_url,
                ..config
            })),
        })
    }

    /// Get the API root.
    pub async fn base_url(&self) -> String {
        self.config.read().await.api_base_url.clone()
    }

    /// Check if an access token is configured.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Replace the access token.
    pub async fn set_access_token(&self, token: impl Into<String>) {
        self.config.write().await.access_token = Some(token.into());
    }

    /// Current playback device, if one has registered.
    pub async fn device_id(&self) -> Option<String> {
        self.config.read().await.device_id.clone()
    }

    /// Point playback commands at `device_id`.
    pub async fn set_device(&self, device_id: impl Into<String>) {
        let device_id = device_id.into();
        info!(device_id = %device_id, "Playback device registered");
        self.config.write().await.device_id = Some(device_id);
    }

    /// Start playing `uri` on the registered device.
    pub async fn play(&self, uri: &str) -> Result<()> {
        let device_id = self.require_device().await?;
        let body = serde_json::json!({ "uris": [uri] });

        debug!(uri = %uri, device_id = %device_id, "Starting playback");
        self.command(
            Method::PUT,
            "/me/player/play",
            &[("device_id", device_id)],
            Some(body),
        )
        .await
    }

    /// Pause the active device.
    pub async fn pause(&self) -> Result<()> {
        self.command(Method::PUT, "/me/player/pause", &[], None).await
    }

    /// Resume the active device.
    pub async fn resume(&self) -> Result<()> {
        self.command(Method::PUT, "/me/player/play", &[], None).await
    }

    /// Seek within the current track.
    pub async fn seek(&self, position_ms: u64) -> Result<()> {
        self.command(
            Method::PUT,
            "/me/player/seek",
            &[("position_ms", position_ms.to_string())],
            None,
        )
        .await
    }

    /// Set the device volume, clamped to 0-100.
    pub async fn set_volume(&self, percent: u8) -> Result<()> {
        let device_id = self.require_device().await?;
        let volume = percent.min(100);

        self.command(
            Method::PUT,
            "/me/player/volume",
            &[
                ("volume_percent", volume.to_string()),
                ("device_id", device_id),
            ],
            None,
        )
        .await
    }

    /// Search the catalog for tracks.
    ///
    /// `limit` defaults to 24 and is clamped to 1-50.
    pub async fn search_tracks(&self, query: &str, limit: Option<u8>) -> Result<Vec<TrackRef>> {
        let (base, token) = self.credentials().await?;
        let limit = limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT)
            .to_string();

        let url = format!("{base}/search");
        debug!(query = %query, limit = %limit, "Searching tracks");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await?;

        let response = check_status(response).await?;
        let search: SearchResponse = response.json().await.map_err(|e| {
            ProviderError::ParseError(format!("Failed to parse search response: {}", e))
        })?;

        let tracks = search.tracks.map(|page| page.items).unwrap_or_default();
        debug!(results = tracks.len(), "Search complete");
        Ok(tracks)
    }

    async fn credentials(&self) -> Result<(String, String)> {
        let config = self.config.read().await;
        let token = config
            .access_token
            .clone()
            .ok_or(ProviderError::AuthRequired)?;
        Ok((config.api_base_url.clone(), token))
    }

    async fn require_device(&self) -> Result<String> {
        self.device_id()
            .await
            .ok_or_else(|| ProviderError::NotReady(NOT_READY_MESSAGE.to_string()))
    }

    async fn command(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        let (base, token) = self.credentials().await?;
        let url = format!("{base}{path}");

        let mut request = self.http.request(method, &url).bearer_auth(token);
        if !query.is_empty() {
            request = request.query(query);
        }
        request = match body {
            Some(body) => request.json(&body),
            // The player endpoints reject a PUT without a length
            None => request.header(reqwest::header::CONTENT_LENGTH, 0),
        };

        let response = request.send().await?;
        check_status(response).await?;

        debug!(url = %url, "Player command accepted");
        Ok(())
    }
}

/// Pass successful responses through and turn the rest into errors.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status.as_u16() == 401 {
        return Err(ProviderError::AuthRequired);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error.message)
        .unwrap_or(text);

    Err(ProviderError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl PlaybackBackend for WebApiClient {
    async fn play_track_at(
        &self,
        uri: &str,
        _position_hint: usize,
    ) -> std::result::Result<(), PlaybackFailure> {
        self.play(uri).await.map_err(Into::into)
    }

    async fn pause(&self) -> std::result::Result<(), PlaybackFailure> {
        WebApiClient::pause(self).await.map_err(Into::into)
    }

    async fn resume(&self) -> std::result::Result<(), PlaybackFailure> {
        WebApiClient::resume(self).await.map_err(Into::into)
    }

    /// The Web API has no stop; pausing is the closest equivalent.
    async fn stop(&self) -> std::result::Result<(), PlaybackFailure> {
        WebApiClient::pause(self).await.map_err(Into::into)
    }

    async fn seek(&self, position_ms: u64) -> std::result::Result<(), PlaybackFailure> {
        WebApiClient::seek(self, position_ms).await.map_err(Into::into)
    }

    async fn set_volume(&self, percent: u8) -> std::result::Result<(), PlaybackFailure> {
        WebApiClient::set_volume(self, percent).await.map_err(Into::into)
    }
}

impl std::fmt::Debug for WebApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebApiClient").finish_non_exhaustive()
    }
}
