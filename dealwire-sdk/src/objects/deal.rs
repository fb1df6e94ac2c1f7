//! Request and response payloads for the deal lifecycle APIs.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Request payload for submitting a new deal.
///
/// Sent by the automation pipeline to the producer API. `id` and `contact`
/// are mandatory; the classification fields fall back to `"unspecified"`
/// and `reference_url` to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDealRequest {
    /// Producer-supplied opaque deal identifier.
    pub id: CompactString,
    /// Acquisition channel (e.g. an ad platform).
    pub channel: Option<CompactString>,
    /// Campaign or form the deal originated from.
    pub source: Option<CompactString>,
    /// Program the prospect is interested in.
    pub program: Option<CompactString>,
    /// The prospect's phone number. Released to the claimant only.
    pub contact: String,
    /// Link to the external CRM record.
    pub reference_url: Option<String>,
}

/// Acknowledgment returned by the producer API on a successful submission.
///
/// Deliberately does not echo the stored deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDealAck {
    pub deal_id: CompactString,
}

/// The redacted deal event fanned out to every connected operator.
///
/// Carries everything an operator needs to decide whether to claim, and,
/// by construction, neither the contact field nor the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealAnnouncement {
    pub id: CompactString,
    pub channel: CompactString,
    pub source: CompactString,
    pub program: CompactString,
    pub reference_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub received_at: OffsetDateTime,
}

/// Response to a successful claim.
///
/// This is the only payload anywhere in the protocol that carries the
/// sensitive contact field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimGrant {
    pub contact: String,
    pub reference_url: String,
}

/// Request body for releasing (skipping) a deal.
///
/// The body is optional on the wire; a missing or empty reason maps to
/// [`SkipReason::Unknown`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRequest {
    pub reason: Option<SkipReason>,
}

/// Why a deal was skipped.
///
/// An open set: operators send `skip` (explicit decline) or `timeout`
/// (the decision window expired); anything else collapses to `unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipReason {
    Skip,
    Timeout,
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Skip => write!(f, "skip"),
            SkipReason::Timeout => write!(f, "timeout"),
            SkipReason::Unknown => write!(f, "unknown"),
        }
    }
}

/// Response of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub deals_in_memory: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_reason_parses_known_codes() {
        let skip: SkipReason = serde_json::from_str("\"skip\"").expect("valid reason");
        let timeout: SkipReason = serde_json::from_str("\"timeout\"").expect("valid reason");
        assert_eq!(skip, SkipReason::Skip);
        assert_eq!(timeout, SkipReason::Timeout);
    }

    #[test]
    fn skip_reason_collapses_unknown_codes() {
        let reason: SkipReason =
            serde_json::from_str("\"wandered-off\"").expect("unknown codes are accepted");
        assert_eq!(reason, SkipReason::Unknown);
        assert_eq!(SkipReason::default(), SkipReason::Unknown);
    }

    #[test]
    fn create_request_requires_id_and_contact() {
        let missing_contact: Result<CreateDealRequest, _> =
            serde_json::from_str(r#"{"id":"d1"}"#);
        assert!(missing_contact.is_err());

        let minimal: CreateDealRequest =
            serde_json::from_str(r#"{"id":"d1","contact":"0601020304"}"#)
                .expect("id + contact is a complete request");
        assert_eq!(minimal.id, "d1");
        assert_eq!(minimal.channel, None);
    }
}
