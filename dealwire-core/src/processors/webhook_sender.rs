//! WebhookSender processor.
//!
//! The WebhookSender is responsible for:
//! - Receiving `DealClaimed` events from the queue
//! - Sending one HTTP POST per event to the configured claim webhook
//! - Logging the outcome and moving on
//!
//! Delivery is at-most-one-attempt: a transport error or non-2xx response
//! is logged and swallowed, never retried, and never surfaced to the
//! operator whose claim already succeeded. An absent target URL turns
//! every dispatch into a logged no-op.

use std::sync::Arc;

use dealwire_sdk::objects::webhook::DealClaimedPayload;
use thiserror::Error;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};
use url::Url;

use crate::events::{DealClaimed, DealClaimedReceiver};

/// Where claim notifications go.
///
/// Lives behind `Arc<RwLock<_>>` in the server's shared config so a
/// SIGHUP reload applies to the next dispatch.
#[derive(Debug, Clone, Default)]
pub struct WebhookConfig {
    /// Target endpoint; `None` disables dispatch.
    pub claim_url: Option<Url>,
}

/// Errors that can occur during a single delivery attempt.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("webhook delivery failed with status {status}: {body}")]
    DeliveryFailed { status: u16, body: String },
}

/// WebhookSender drains claim events into downstream notifications.
pub struct WebhookSender {
    config: Arc<RwLock<WebhookConfig>>,
    claimed_rx: DealClaimedReceiver,
    shutdown_rx: watch::Receiver<bool>,
    http_client: reqwest::Client,
}

impl WebhookSender {
    /// Create a new WebhookSender.
    ///
    /// # Arguments
    ///
    /// * `config` - Shared webhook target, reloadable at runtime
    /// * `claimed_rx` - Receiver for DealClaimed events
    /// * `shutdown_rx` - Receiver for the shutdown signal
    pub fn new(
        config: Arc<RwLock<WebhookConfig>>,
        claimed_rx: DealClaimedReceiver,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            claimed_rx,
            shutdown_rx,
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Run the WebhookSender until shutdown or queue closure.
    pub async fn run(mut self) {
        info!("WebhookSender started");

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("WebhookSender received shutdown signal");
                        break;
                    }
                }

                Some(event) = self.claimed_rx.recv() => {
                    self.dispatch(event).await;
                }

                else => {
                    info!("claim event channel closed");
                    break;
                }
            }
        }

        info!("WebhookSender shutdown complete");
    }

    /// Deliver one claim notification, best-effort.
    async fn dispatch(&self, event: DealClaimed) {
        let target = { self.config.read().await.claim_url.clone() };

        let Some(url) = target else {
            debug!(deal_id = %event.id, "no claim webhook configured, skipping dispatch");
            return;
        };

        let payload = DealClaimedPayload {
            event_type: DealClaimedPayload::EVENT_TYPE.to_owned(),
            deal_id: event.id.clone(),
            resolved_at: event.resolved_at.unix_timestamp(),
        };

        match self.send_webhook(&url, &payload).await {
            Ok(()) => {
                info!(deal_id = %event.id, "claim webhook delivered");
            }
            Err(e) => {
                warn!(deal_id = %event.id, error = %e, "claim webhook delivery failed");
            }
        }
    }

    /// Send the webhook HTTP request.
    async fn send_webhook(
        &self,
        url: &Url,
        payload: &DealClaimedPayload,
    ) -> Result<(), WebhookError> {
        let response = self
            .http_client
            .post(url.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(WebhookError::DeliveryFailed {
                status: status.as_u16(),
                body,
            })
        }
    }
}
