//! Event system wiring the lifecycle operations to the background
//! processors and the operator fan-out.
//!
//! # Event flow
//!
//! 1. A successful ingest publishes a redacted `DealAnnouncement` on the
//!    broadcast channel; every attached WebSocket session forwards it.
//! 2. A successful claim queues a `DealClaimed` event; the `WebhookSender`
//!    drains the queue and notifies the downstream pipeline.
//!
//! Events are ephemeral: nothing is replayed, and a send with zero
//! consumers is silently dropped.

pub mod channels;
pub mod types;

pub use channels::{
    AnnouncementReceiver, AnnouncementSender, DEFAULT_CHANNEL_BUFFER, DealClaimedReceiver,
    DealClaimedSender, announcement_channel, deal_claimed_channel,
};
pub use types::DealClaimed;
