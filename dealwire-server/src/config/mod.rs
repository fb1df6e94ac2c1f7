//! Configuration module for dealwire-server.
//!
//! Handles loading configuration from the TOML file and CLI arguments,
//! and validating it into the runtime sections.

pub mod file;
pub mod runtime;

use crate::config::file::FileConfig;
use crate::config::runtime::{
    ProducerConfig, RetentionConfig, ServerConfig, SharedConfig, WebhookConfig,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Loaded configuration result containing all parts.
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub producer: ProducerConfig,
    pub webhook: WebhookConfig,
    pub retention: RetentionConfig,
}

impl LoadedConfig {
    /// Convert into a SharedConfig with Arc<RwLock<T>> wrappers.
    ///
    /// The retention section is consumed separately at startup; it is not
    /// reloadable.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig {
            server: Arc::new(RwLock::new(self.server)),
            producer: Arc::new(RwLock::new(self.producer)),
            webhook: Arc::new(RwLock::new(self.webhook)),
        }
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Build the runtime sections
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        let claim_url = self.validate(&file_config)?;

        Ok(LoadedConfig {
            server: ServerConfig {
                listen: file_config.server.listen,
                enable_test_endpoint: file_config.server.enable_test_endpoint,
            },
            producer: ProducerConfig::new(file_config.producer.token.into_bytes()),
            webhook: WebhookConfig { claim_url },
            retention: RetentionConfig {
                horizon: Duration::from_secs(file_config.retention.horizon_secs),
                sweep_interval: Duration::from_secs(file_config.retention.sweep_interval_secs),
            },
        })
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn validate(&self, config: &FileConfig) -> Result<Option<Url>, ConfigError> {
        if config.producer.token.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "producer token must not be empty".to_owned(),
            ));
        }
        if config.retention.horizon_secs == 0 || config.retention.sweep_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "retention horizon and sweep interval must be positive".to_owned(),
            ));
        }

        match &config.webhook.claim_url {
            None => Ok(None),
            Some(raw) => Url::parse(raw).map(Some).map_err(|e| {
                ConfigError::ValidationError(format!("invalid webhook claim_url: {e}"))
            }),
        }
    }
}
