//! Runtime configuration shared across handlers and processors.
//!
//! Each section sits behind its own `Arc<RwLock<T>>` so a SIGHUP reload
//! swaps sections independently while requests are in flight.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub use dealwire_core::processors::WebhookConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The bound address. A reloaded value takes effect on restart only.
    pub listen: SocketAddr,
    /// Whether `GET /api/test-deal` answers.
    pub enable_test_endpoint: bool,
}

/// Producer authentication configuration.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Shared secret bytes for the bearer-token check.
    token: Box<[u8]>,
}

impl ProducerConfig {
    pub fn new(token: impl Into<Box<[u8]>>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The secret bytes, for constant-time comparison.
    pub fn token_bytes(&self) -> &[u8] {
        &self.token
    }
}

/// Retention sweeper configuration. Read once at startup.
#[derive(Debug, Clone, Copy)]
pub struct RetentionConfig {
    pub horizon: Duration,
    pub sweep_interval: Duration,
}

/// All reloadable configuration sections.
#[derive(Debug, Clone)]
pub struct SharedConfig {
    pub server: Arc<RwLock<ServerConfig>>,
    pub producer: Arc<RwLock<ProducerConfig>>,
    pub webhook: Arc<RwLock<WebhookConfig>>,
}
