//! Jukebox Provider Client
//!
//! HTTP client for the streaming provider's Web API.
//!
//! # Features
//!
//! - **Playback**: play a URI on the registered device, pause, resume,
//!   seek, volume (implements [`jukebox_core::PlaybackBackend`])
//! - **Search**: find tracks to submit to the queue
//!
//! Authentication flows are out of scope: the client is handed a bearer
//! token and uses it until told otherwise.
//!
//! # Example
//!
//! ```ignore
//! use jukebox_provider::{WebApiClient, WebApiConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WebApiConfig::default()
//!         .with_token(std::env::var("JUKEBOX_TOKEN")?)
//!         .with_device("kitchen-speaker");
//!     let client = WebApiClient::new(config)?;
//!
//!     let tracks = client.search_tracks("harder better", Some(5)).await?;
//!     if let Some(track) = tracks.first() {
//!         client.play(&track.uri).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;

pub use client::{WebApiClient, WebApiConfig, DEFAULT_API_BASE_URL, DEFAULT_SEARCH_LIMIT};
pub use error::{ProviderError, Result, NOT_READY_MESSAGE};
