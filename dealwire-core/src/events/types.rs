//! Event type definitions.

use compact_str::CompactString;
use time::OffsetDateTime;

/// Emitted when an operator wins the claim on a deal.
///
/// Consumed by the `WebhookSender`; carries only what the downstream
/// notification needs, never the contact field.
#[derive(Debug, Clone)]
pub struct DealClaimed {
    pub id: CompactString,
    pub resolved_at: OffsetDateTime,
}
