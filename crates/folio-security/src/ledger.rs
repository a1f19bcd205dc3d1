//! In-memory record of redeemed link ids
//!
//! Only used when links are single-use. Entries live until their token would
//! have expired anyway, so the set never outgrows the links issued in one TTL.

use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct RedemptionLedger {
    redeemed: DashMap<Uuid, DateTime<Utc>>,
}

impl RedemptionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a redemption. Returns `false` if `id` was already redeemed.
    pub fn claim(&self, id: Uuid, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.prune(now);
        match self.redeemed.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(expires_at);
                true
            }
        }
    }

    /// Drop ids whose tokens have expired.
    pub fn prune(&self, now: DateTime<Utc>) {
        let before = self.redeemed.len();
        self.redeemed.retain(|_, expires_at| *expires_at >= now);
        let removed = before.saturating_sub(self.redeemed.len());
        if removed > 0 {
            debug!("Pruned {} expired redemption entries", removed);
        }
    }

    pub fn len(&self) -> usize {
        self.redeemed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.redeemed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
    }

    #[test]
    fn second_claim_is_refused() {
        let ledger = RedemptionLedger::new();
        let id = Uuid::new_v4();
        let expires_at = now() + Duration::hours(24);

        assert!(ledger.claim(id, expires_at, now()));
        assert!(!ledger.claim(id, expires_at, now() + Duration::minutes(5)));
        assert!(ledger.claim(Uuid::new_v4(), expires_at, now()));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn expired_entries_are_pruned() {
        let ledger = RedemptionLedger::new();
        ledger.claim(Uuid::new_v4(), now() + Duration::hours(1), now());
        ledger.claim(Uuid::new_v4(), now() + Duration::hours(24), now());

        ledger.prune(now() + Duration::hours(2));
        assert_eq!(ledger.len(), 1);

        ledger.prune(now() + Duration::hours(25));
        assert!(ledger.is_empty());
    }
}
