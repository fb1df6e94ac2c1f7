//! TOML file configuration structures.
//!
//! These structs directly map to the `dealwire-config.toml` file format.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub server: ServerSection,
    pub producer: ProducerSection,
    #[serde(default)]
    pub webhook: WebhookSection,
    #[serde(default)]
    pub retention: RetentionSection,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// The address and port to listen on (e.g., "0.0.0.0:3000").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
    /// Expose `GET /api/test-deal`, which injects a sample deal through the
    /// normal ingest path. Off by default; meant for local runs only.
    #[serde(default)]
    pub enable_test_endpoint: bool,
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:3000".parse().expect("valid default address")
}

/// Producer authentication section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducerSection {
    /// Shared secret the automation pipeline presents as a bearer token.
    pub token: String,
}

/// Downstream notification section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookSection {
    /// Endpoint notified when a deal is claimed. Absent = dispatch is a
    /// logged no-op.
    pub claim_url: Option<String>,
}

/// Retention section. Both values default to one hour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetentionSection {
    #[serde(default = "default_retention_secs")]
    pub horizon_secs: u64,
    #[serde(default = "default_retention_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for RetentionSection {
    fn default() -> Self {
        Self {
            horizon_secs: default_retention_secs(),
            sweep_interval_secs: default_retention_secs(),
        }
    }
}

fn default_retention_secs() -> u64 {
    3600
}
