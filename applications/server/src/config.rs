/// Server configuration
use crate::error::{Result, ServerError};
use jukebox_provider::DEFAULT_API_BASE_URL;
use jukebox_queue::QueueConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub queue: QueueConfig,

    #[serde(default = "default_provider")]
    pub provider: ProviderSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// JSON file holding the queue, current user, and volume
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Keep everything in memory; nothing survives a restart
    #[serde(default)]
    pub in_memory: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer token; playback and search are disabled without one
    #[serde(default)]
    pub access_token: Option<String>,

    /// Device to play on, if already known
    #[serde(default)]
    pub device_id: Option<String>,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given. Without it, `config.toml` in the
    /// working directory is used if present. `JUKEBOX__SECTION__KEY`
    /// environment variables override both.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (JUKEBOX__QUEUE__MAX_PER_USER=5)
        settings = settings.add_source(
            config::Environment::with_prefix("JUKEBOX")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.queue.max_per_user == 0 {
            return Err(ServerError::Config(
                "queue.max_per_user must be at least 1".to_string(),
            ));
        }

        if self.queue.track_duration_secs == 0 {
            return Err(ServerError::Config(
                "queue.track_duration_secs must be at least 1".to_string(),
            ));
        }

        let url = &self.provider.api_base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerError::Config(format!(
                "provider.api_base_url must start with http:// or https:// (got {url:?})"
            )));
        }

        if self
            .provider
            .access_token
            .as_deref()
            .is_some_and(|t| t.trim().is_empty())
        {
            return Err(ServerError::Config(
                "provider.access_token is set but empty".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        data_path: default_data_path(),
        in_memory: false,
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data/jukebox.json")
}

fn default_provider() -> ProviderSettings {
    ProviderSettings {
        api_base_url: default_api_base_url(),
        access_token: None,
        device_id: None,
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            queue: QueueConfig::default(),
            provider: default_provider(),
        }
    }
}
