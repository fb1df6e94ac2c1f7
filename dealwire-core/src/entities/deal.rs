//! The deal entity and its lifecycle vocabulary.

use compact_str::CompactString;
use dealwire_sdk::objects::deal::{CreateDealRequest, DealAnnouncement, SkipReason};
use time::OffsetDateTime;

/// Classification fields the producer left empty fall back to this value.
const UNSPECIFIED: &str = "unspecified";

/// A lead requiring a human operator decision.
///
/// The canonical copy lives in the `DealStore`; everything handed out of
/// the store is a snapshot. After creation the only mutation is the single
/// `pending → accepted | skipped` transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// Producer-supplied opaque identifier, unique among live deals.
    pub id: CompactString,
    pub channel: CompactString,
    pub source: CompactString,
    pub program: CompactString,
    /// The prospect's phone number. Never broadcast; released only
    /// through a successful claim.
    pub contact: String,
    pub reference_url: String,
    pub received_at: OffsetDateTime,
    pub status: DealStatus,
    /// Set exactly once, when the status leaves `Pending`.
    pub resolved_at: Option<OffsetDateTime>,
    /// Present only on skipped deals.
    pub skip_reason: Option<SkipReason>,
}

/// Where a deal stands in its lifecycle.
///
/// `Accepted` and `Skipped` are terminal; there is no way back to
/// `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealStatus {
    Pending,
    Accepted,
    Skipped,
}

impl std::fmt::Display for DealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DealStatus::Pending => write!(f, "pending"),
            DealStatus::Accepted => write!(f, "accepted"),
            DealStatus::Skipped => write!(f, "skipped"),
        }
    }
}

impl Deal {
    /// Build a pending deal from a producer request, applying the
    /// `"unspecified"` defaults.
    ///
    /// The caller is responsible for having validated `id` and `contact`.
    pub fn from_request(req: CreateDealRequest, received_at: OffsetDateTime) -> Self {
        Self {
            id: req.id,
            channel: req.channel.unwrap_or_else(unspecified),
            source: req.source.unwrap_or_else(unspecified),
            program: req.program.unwrap_or_else(unspecified),
            contact: req.contact,
            reference_url: req.reference_url.unwrap_or_default(),
            received_at,
            status: DealStatus::Pending,
            resolved_at: None,
            skip_reason: None,
        }
    }

    /// The redacted projection fanned out to operators.
    ///
    /// Carries every field except `contact` and `status`.
    pub fn announcement(&self) -> DealAnnouncement {
        DealAnnouncement {
            id: self.id.clone(),
            channel: self.channel.clone(),
            source: self.source.clone(),
            program: self.program.clone(),
            reference_url: self.reference_url.clone(),
            received_at: self.received_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == DealStatus::Pending
    }
}

fn unspecified() -> CompactString {
    CompactString::const_new(UNSPECIFIED)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(id: &str, contact: &str) -> CreateDealRequest {
        CreateDealRequest {
            id: id.into(),
            channel: None,
            source: None,
            program: None,
            contact: contact.into(),
            reference_url: None,
        }
    }

    #[test]
    fn from_request_applies_defaults() {
        let deal = Deal::from_request(request("d1", "0601020304"), OffsetDateTime::UNIX_EPOCH);
        assert_eq!(deal.channel, UNSPECIFIED);
        assert_eq!(deal.source, UNSPECIFIED);
        assert_eq!(deal.program, UNSPECIFIED);
        assert_eq!(deal.reference_url, "");
        assert_eq!(deal.status, DealStatus::Pending);
        assert_eq!(deal.resolved_at, None);
        assert_eq!(deal.skip_reason, None);
    }

    #[test]
    fn announcement_never_carries_the_contact_field() {
        let mut req = request("d1", "0601020304");
        req.channel = Some("Paid Social".into());
        req.reference_url = Some("https://crm.example.com/deals/d1".into());
        let deal = Deal::from_request(req, OffsetDateTime::UNIX_EPOCH);

        let value = serde_json::to_value(deal.announcement()).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("contact"));
        assert!(!object.contains_key("status"));
        assert_eq!(object["id"], "d1");
        assert_eq!(object["channel"], "Paid Social");
        // The serialized form must not leak the number anywhere, under any key.
        assert!(!value.to_string().contains("0601020304"));
    }
}
