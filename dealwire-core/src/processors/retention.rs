//! Retention sweeper processor.
//!
//! Periodically evicts every deal older than the retention horizon,
//! resolved or not, to keep the in-memory store bounded. Each eviction
//! takes only the entry's own lock, so a sweep pass never stalls request
//! handling.

use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::store::DealStore;

/// Background task that bounds the age of stored deals.
pub struct RetentionSweeper {
    store: Arc<DealStore>,
    horizon: Duration,
    period: Duration,
    shutdown_rx: watch::Receiver<bool>,
}

impl RetentionSweeper {
    /// Create a new RetentionSweeper.
    ///
    /// * `horizon` - maximum deal age; anything received earlier is evicted
    /// * `period` - how often a sweep pass runs
    pub fn new(
        store: Arc<DealStore>,
        horizon: Duration,
        period: Duration,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            store,
            horizon,
            period,
            shutdown_rx,
        }
    }

    /// Run sweep passes until shutdown.
    pub async fn run(mut self) {
        info!(
            horizon_secs = self.horizon.as_secs(),
            period_secs = self.period.as_secs(),
            "RetentionSweeper started"
        );

        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the first
        // real pass happens one full period after startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("RetentionSweeper received shutdown signal");
                        break;
                    }
                }

                _ = ticker.tick() => {
                    let cutoff = OffsetDateTime::now_utc() - self.horizon;
                    let removed = self.store.sweep_older_than(cutoff);
                    if removed > 0 {
                        info!(removed, "evicted stale deals from memory");
                    } else {
                        debug!("sweep pass found nothing to evict");
                    }
                }
            }
        }

        info!("RetentionSweeper shutdown complete");
    }
}
