/// Shared application state
use crate::backend::UnavailableBackend;
use crate::config::ServerConfig;
use crate::error::Result;
use jukebox_core::{Clock, KeyValueStore, PlaybackBackend, SystemClock, UserName};
use jukebox_provider::{WebApiClient, WebApiConfig};
use jukebox_queue::{IdentityRegister, PlaybackCoordinator, QueueConfig, QueueStore};
use jukebox_storage::{FileStore, MemoryStore};
use std::sync::Arc;

/// Application state shared across all handlers
///
/// One register, one queue, one coordinator: every client of this server
/// is treated as the same station.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityRegister>,
    pub queue: Arc<QueueStore>,
    pub coordinator: Arc<PlaybackCoordinator>,
    pub provider: Option<Arc<WebApiClient>>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wire the services over the given collaborators
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        queue_config: QueueConfig,
        backend: Arc<dyn PlaybackBackend>,
        provider: Option<Arc<WebApiClient>>,
    ) -> Self {
        let identity = Arc::new(IdentityRegister::new(Arc::clone(&storage)));
        let queue = Arc::new(QueueStore::new(
            Arc::clone(&storage),
            Arc::clone(&clock),
            queue_config,
        ));
        let coordinator = Arc::new(PlaybackCoordinator::new(
            Arc::clone(&queue),
            backend,
            storage,
        ));

        Self {
            identity,
            queue,
            coordinator,
            provider,
            clock,
        }
    }

    /// Build storage and the provider client from configuration
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let storage: Arc<dyn KeyValueStore> = if config.storage.in_memory {
            tracing::warn!("Using in-memory storage, the queue will not survive a restart");
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(FileStore::open(&config.storage.data_path)?)
        };

        let provider = match &config.provider.access_token {
            Some(token) => {
                let mut web = WebApiConfig::new(config.provider.api_base_url.clone())
                    .with_token(token.clone());
                if let Some(device_id) = &config.provider.device_id {
                    web = web.with_device(device_id.clone());
                }
                Some(Arc::new(WebApiClient::new(web)?))
            }
            None => {
                tracing::warn!("No provider access token configured, playback and search are disabled");
                None
            }
        };

        let backend: Arc<dyn PlaybackBackend> = match &provider {
            Some(client) => Arc::clone(client) as Arc<dyn PlaybackBackend>,
            None => Arc::new(UnavailableBackend),
        };

        Ok(Self::new(
            storage,
            Arc::new(SystemClock),
            config.queue.clone(),
            backend,
            provider,
        ))
    }

    /// Current user, or the no-identity error
    pub fn require_user(&self) -> Result<UserName> {
        self.identity
            .current_user()
            .ok_or(crate::error::ServerError::NoIdentity)
    }
}
