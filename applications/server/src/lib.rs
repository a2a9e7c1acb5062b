//! Jukebox Server Library
//!
//! HTTP front end for one shared jukebox station: identity, queue,
//! playback controls, and track search.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use api::router;
pub use backend::UnavailableBackend;
pub use config::ServerConfig;
pub use error::{Result, ServerError, NO_IDENTITY_MESSAGE};
pub use state::AppState;
