//! Event channel factories and handles.

use dealwire_sdk::objects::deal::DealAnnouncement;
use tokio::sync::{broadcast, mpsc};

use super::types::DealClaimed;

/// Default buffer size for event channels.
///
/// Enough to absorb bursts while keeping memory bounded; a consumer that
/// falls further behind than this on the broadcast side observes a lag
/// error and loses the oldest events.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for DealClaimed events.
pub type DealClaimedSender = mpsc::Sender<DealClaimed>;
/// Receiver handle for DealClaimed events.
pub type DealClaimedReceiver = mpsc::Receiver<DealClaimed>;

/// Sender handle for the operator announcement fan-out.
pub type AnnouncementSender = broadcast::Sender<DealAnnouncement>;
/// Receiver handle for the operator announcement fan-out.
pub type AnnouncementReceiver = broadcast::Receiver<DealAnnouncement>;

/// Create a new DealClaimed channel.
///
/// Returns a (sender, receiver) pair; the receiver belongs to the single
/// `WebhookSender` instance.
pub fn deal_claimed_channel() -> (DealClaimedSender, DealClaimedReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

/// Create the announcement fan-out channel.
///
/// Returns only the sender; each WebSocket session subscribes its own
/// receiver. Sending with no subscribers attached is a no-op.
pub fn announcement_channel() -> AnnouncementSender {
    let (sender, _) = broadcast::channel(DEFAULT_CHANNEL_BUFFER);
    sender
}
