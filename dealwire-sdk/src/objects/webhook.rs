//! Webhook payload sent downstream when a deal is claimed.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Payload POSTed to the configured claim webhook.
///
/// `resolved_at` is a unix timestamp (seconds). Delivery is best-effort
/// and attempted at most once per claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealClaimedPayload {
    pub event_type: String,
    pub deal_id: CompactString,
    pub resolved_at: i64,
}

impl DealClaimedPayload {
    /// The `event_type` value carried by every claim webhook.
    pub const EVENT_TYPE: &'static str = "deal_claimed";
}
