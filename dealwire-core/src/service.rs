//! The lifecycle controller: ingest, claim, release.
//!
//! `DealService` combines the store, the operator fan-out and the webhook
//! queue under the transition rules. All methods are synchronous: the
//! store is lock-per-entry and the side effects are channel sends that
//! never wait, so request handlers block only for the duration of a
//! single map mutation.

use std::sync::Arc;

use dealwire_sdk::objects::deal::{ClaimGrant, CreateDealRequest, SkipReason};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::entities::Deal;
use crate::events::{AnnouncementSender, DealClaimed, DealClaimedSender};
use crate::store::{DealStore, DuplicateId, Resolution, TransitionError};

/// Why an ingest was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestError {
    /// A mandatory field was empty.
    #[error("missing required field `{0}`")]
    Validation(&'static str),

    /// The id is already live in the store.
    #[error(transparent)]
    Duplicate(#[from] DuplicateId),
}

/// Request-facing operations over the deal lifecycle.
pub struct DealService {
    store: Arc<DealStore>,
    announcements: AnnouncementSender,
    claimed_tx: DealClaimedSender,
}

impl DealService {
    pub fn new(
        store: Arc<DealStore>,
        announcements: AnnouncementSender,
        claimed_tx: DealClaimedSender,
    ) -> Self {
        Self {
            store,
            announcements,
            claimed_tx,
        }
    }

    /// Validate and store a new deal, then fan out the redacted
    /// announcement to every attached operator.
    ///
    /// Exactly one announcement is emitted per successful call. The
    /// stored deal is not returned.
    pub fn ingest(&self, req: CreateDealRequest) -> Result<(), IngestError> {
        if req.id.is_empty() {
            return Err(IngestError::Validation("id"));
        }
        if req.contact.is_empty() {
            return Err(IngestError::Validation("contact"));
        }

        let deal = Deal::from_request(req, OffsetDateTime::now_utc());
        let announcement = deal.announcement();
        let id = deal.id.clone();
        let channel = deal.channel.clone();
        let program = deal.program.clone();

        self.store.insert(deal)?;

        // A send error only means there are zero attached operators.
        let _ = self.announcements.send(announcement);

        info!(deal_id = %id, %channel, %program, "deal ingested and announced");
        Ok(())
    }

    /// Claim a pending deal for the calling operator.
    ///
    /// The winning call gets the contact field (the single point where it
    /// leaves the store) and queues a best-effort downstream notification
    /// that the caller never waits on.
    pub fn claim(&self, id: &str) -> Result<ClaimGrant, TransitionError> {
        let now = OffsetDateTime::now_utc();
        let deal = self.store.resolve(id, Resolution::Accept, now)?;

        let event = DealClaimed {
            id: deal.id.clone(),
            resolved_at: now,
        };
        if let Err(e) = self.claimed_tx.try_send(event) {
            // The claim already won; a full or closed queue costs only the
            // downstream notification.
            warn!(deal_id = %deal.id, error = %e, "failed to queue claim notification");
        }

        info!(deal_id = %deal.id, "deal claimed");
        Ok(ClaimGrant {
            contact: deal.contact,
            reference_url: deal.reference_url,
        })
    }

    /// Decline a pending deal. Pure bookkeeping: no broadcast, no webhook.
    pub fn release(&self, id: &str, reason: SkipReason) -> Result<(), TransitionError> {
        let deal = self
            .store
            .resolve(id, Resolution::Skip(reason), OffsetDateTime::now_utc())?;
        info!(deal_id = %deal.id, %reason, "deal skipped");
        Ok(())
    }

    /// Number of live deals, for the health endpoint.
    pub fn store_size(&self) -> usize {
        self.store.len()
    }

    /// Snapshot accessor, used by tests and diagnostics.
    pub fn get(&self, id: &str) -> Option<Deal> {
        self.store.get(id)
    }
}

impl std::fmt::Debug for DealService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DealService")
            .field("store_size", &self.store.len())
            .finish()
    }
}
