//! Application state shared across all request handlers.

use crate::config::runtime::SharedConfig;
use dealwire_core::events::AnnouncementSender;
use dealwire_core::service::DealService;
use std::sync::Arc;
use std::time::Instant;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// The lifecycle controller (ingest / claim / release).
    pub service: Arc<DealService>,
    /// Fan-out handle the WebSocket sessions subscribe to.
    pub announcements: AnnouncementSender,
    /// Runtime configuration (reloadable via SIGHUP).
    pub config: SharedConfig,
    /// Process start, for the health endpoint's uptime.
    pub started_at: Instant,
}

impl AppState {
    /// Create a new AppState.
    pub fn new(
        service: Arc<DealService>,
        announcements: AnnouncementSender,
        config: SharedConfig,
    ) -> Self {
        Self {
            service,
            announcements,
            config,
            started_at: Instant::now(),
        }
    }
}
