//! The authoritative in-memory deal store.
//!
//! Keyed by deal id on a sharded concurrent map. Every operation is
//! individually atomic: `resolve` performs its check-and-set under the
//! entry's lock, so of any number of concurrent resolutions for one id
//! exactly one succeeds and the rest observe [`TransitionError::AlreadyResolved`].
//! The sweep never holds a store-wide lock; it re-checks age per entry.

use compact_str::CompactString;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dealwire_sdk::objects::deal::SkipReason;
use thiserror::Error;
use time::OffsetDateTime;

use crate::entities::{Deal, DealStatus};

/// Rejection of an insert whose id is already live.
///
/// Policy: reject, never overwrite. The first producer write wins.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("deal `{0}` already exists")]
pub struct DuplicateId(pub CompactString);

/// Why a `pending → terminal` transition did not happen.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// No live deal has this id.
    #[error("deal not found")]
    NotFound,

    /// The deal already left `pending`. The legitimate outcome for every
    /// race loser; a conflict, not a fault.
    #[error("deal already resolved")]
    AlreadyResolved,
}

/// The terminal state requested from [`DealStore::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Accept,
    Skip(SkipReason),
}

/// Authoritative holder of all live deals.
///
/// The map is the only shared mutable state in the system and is never
/// exposed directly; mutation happens solely through `insert`, `resolve`
/// and `sweep_older_than`.
#[derive(Debug, Default)]
pub struct DealStore {
    deals: DashMap<CompactString, Deal>,
}

impl DealStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly created pending deal.
    pub fn insert(&self, deal: Deal) -> Result<(), DuplicateId> {
        match self.deals.entry(deal.id.clone()) {
            Entry::Occupied(_) => Err(DuplicateId(deal.id)),
            Entry::Vacant(slot) => {
                slot.insert(deal);
                Ok(())
            }
        }
    }

    /// Atomically move a pending deal to a terminal status.
    ///
    /// The status check and the mutation happen under the entry's lock;
    /// no caller can observe a half-applied transition. Returns a snapshot
    /// of the deal as resolved.
    pub fn resolve(
        &self,
        id: &str,
        resolution: Resolution,
        at: OffsetDateTime,
    ) -> Result<Deal, TransitionError> {
        let mut entry = self.deals.get_mut(id).ok_or(TransitionError::NotFound)?;
        if !entry.is_pending() {
            return Err(TransitionError::AlreadyResolved);
        }

        match resolution {
            Resolution::Accept => entry.status = DealStatus::Accepted,
            Resolution::Skip(reason) => {
                entry.status = DealStatus::Skipped;
                entry.skip_reason = Some(reason);
            }
        }
        entry.resolved_at = Some(at);

        Ok(entry.clone())
    }

    /// Snapshot of a single deal.
    pub fn get(&self, id: &str) -> Option<Deal> {
        self.deals.get(id).map(|entry| entry.clone())
    }

    /// Evict every deal received strictly before `cutoff`, regardless of
    /// status, and return the eviction count.
    ///
    /// Two phases: collect candidate ids, then remove each under its own
    /// entry lock with the age re-checked. A deal resolved between the
    /// phases is still evicted (it remains older than the cutoff); a deal
    /// cannot be evicted mid-transition because `resolve` holds the entry
    /// lock for its whole check-and-set.
    pub fn sweep_older_than(&self, cutoff: OffsetDateTime) -> usize {
        let expired: Vec<CompactString> = self
            .deals
            .iter()
            .filter(|entry| entry.received_at < cutoff)
            .map(|entry| entry.id.clone())
            .collect();

        let mut removed = 0;
        for id in expired {
            if self
                .deals
                .remove_if(&id, |_, deal| deal.received_at < cutoff)
                .is_some()
            {
                removed += 1;
            }
        }
        removed
    }

    /// Number of live deals, any status.
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use dealwire_sdk::objects::deal::CreateDealRequest;
    use time::Duration;

    fn deal(id: &str, received_at: OffsetDateTime) -> Deal {
        Deal::from_request(
            CreateDealRequest {
                id: id.into(),
                channel: None,
                source: None,
                program: None,
                contact: "0601020304".into(),
                reference_url: None,
            },
            received_at,
        )
    }

    fn now() -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH + Duration::days(20_000)
    }

    #[test]
    fn insert_rejects_duplicate_ids_and_keeps_the_first_write() {
        let store = DealStore::new();
        let mut first = deal("d1", now());
        first.contact = "first".into();
        let mut second = deal("d1", now());
        second.contact = "second".into();

        assert_eq!(store.insert(first), Ok(()));
        assert_eq!(store.insert(second), Err(DuplicateId("d1".into())));
        assert_eq!(store.get("d1").unwrap().contact, "first");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn resolve_is_terminal_in_both_directions() {
        let store = DealStore::new();
        store.insert(deal("d1", now())).unwrap();
        store.insert(deal("d2", now())).unwrap();

        let accepted = store.resolve("d1", Resolution::Accept, now()).unwrap();
        assert_eq!(accepted.status, DealStatus::Accepted);
        assert_eq!(accepted.resolved_at, Some(now()));
        assert_eq!(
            store.resolve("d1", Resolution::Skip(SkipReason::Skip), now()),
            Err(TransitionError::AlreadyResolved)
        );

        let skipped = store
            .resolve("d2", Resolution::Skip(SkipReason::Timeout), now())
            .unwrap();
        assert_eq!(skipped.status, DealStatus::Skipped);
        assert_eq!(skipped.skip_reason, Some(SkipReason::Timeout));
        assert_eq!(
            store.resolve("d2", Resolution::Accept, now()),
            Err(TransitionError::AlreadyResolved)
        );
    }

    #[test]
    fn resolve_unknown_id_reports_not_found() {
        let store = DealStore::new();
        assert_eq!(
            store.resolve("ghost", Resolution::Accept, now()),
            Err(TransitionError::NotFound)
        );
    }

    #[test]
    fn concurrent_resolutions_admit_exactly_one_winner() {
        let store = DealStore::new();
        store.insert(deal("contested", now())).unwrap();

        let outcomes: Vec<Result<Deal, TransitionError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|i| {
                    let store = &store;
                    scope.spawn(move || {
                        let resolution = if i % 2 == 0 {
                            Resolution::Accept
                        } else {
                            Resolution::Skip(SkipReason::Skip)
                        };
                        store.resolve("contested", resolution, now())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winners = outcomes.iter().filter(|r| r.is_ok()).count();
        let losers = outcomes
            .iter()
            .filter(|r| matches!(r, Err(TransitionError::AlreadyResolved)))
            .count();
        assert_eq!(winners, 1);
        assert_eq!(losers, 15);
    }

    #[test]
    fn sweep_honors_the_cutoff_in_both_directions() {
        let store = DealStore::new();
        let base = now();
        store.insert(deal("old-pending", base)).unwrap();
        store.insert(deal("old-resolved", base)).unwrap();
        store.insert(deal("fresh", base + Duration::hours(2))).unwrap();
        store
            .resolve("old-resolved", Resolution::Accept, base)
            .unwrap();

        // Cutoff before everything: nothing goes.
        assert_eq!(store.sweep_older_than(base - Duration::hours(1)), 0);
        assert_eq!(store.len(), 3);

        // Cutoff between: both old deals go, pending or not.
        assert_eq!(store.sweep_older_than(base + Duration::hours(1)), 2);
        assert_eq!(store.get("old-pending"), None);
        assert_eq!(store.get("old-resolved"), None);
        assert!(store.get("fresh").is_some());

        // Cutoff after everything: the rest goes too.
        assert_eq!(store.sweep_older_than(base + Duration::hours(3)), 1);
        assert!(store.is_empty());
    }
}
