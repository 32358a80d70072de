use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use herald_types::error::HeraldError;
use herald_types::notice::ChangeType;
use herald_types::primitives::{short_hash, Hash, Timestamp};
use tracing::debug;

use crate::notice::Notice;
use crate::sink::NoticeSink;

/// Process-wide set of accepted notices, keyed by content hash.
///
/// A single mutex covers lookups as well as the sweep + insert unit, so a
/// reader never observes a half-applied update. Callers only ever receive
/// clones of stored notices.
pub struct NoticeStore {
    entries: Mutex<HashMap<Hash, Notice>>,
}

impl NoticeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Hash, Notice>>, HeraldError> {
        self.entries.lock().map_err(|e| HeraldError::StoreUnavailable {
            reason: e.to_string(),
        })
    }

    /// Look up a notice by content hash. Does not check whether it is still
    /// in effect.
    pub fn get(&self, hash: &Hash) -> Result<Option<Notice>, HeraldError> {
        Ok(self.lock()?.get(hash).cloned())
    }

    pub fn contains(&self, hash: &Hash) -> Result<bool, HeraldError> {
        Ok(self.lock()?.contains_key(hash))
    }

    pub fn len(&self) -> Result<usize, HeraldError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, HeraldError> {
        Ok(self.lock()?.is_empty())
    }

    /// Clones of every stored notice, highest priority first.
    pub fn snapshot(&self) -> Result<Vec<Notice>, HeraldError> {
        let mut notices: Vec<Notice> = self.lock()?.values().cloned().collect();
        notices.sort_by(|a, b| {
            b.content()
                .priority
                .cmp(&a.content().priority)
                .then_with(|| a.hash().cmp(&b.hash()))
        });
        Ok(notices)
    }

    /// Remove every notice no longer in effect at `now`, then store `notice`
    /// (replacing an entry with the same hash). Both steps run under one lock
    /// acquisition and report to `sink` before it is released.
    ///
    /// Returns the number of expired notices removed.
    pub fn sweep_and_insert(
        &self,
        notice: Notice,
        now: Timestamp,
        sink: &dyn NoticeSink,
    ) -> Result<usize, HeraldError> {
        let mut entries = self.lock()?;

        let expired: Vec<Hash> = entries
            .iter()
            .filter(|(_, stored)| !stored.is_in_effect(now))
            .map(|(hash, _)| *hash)
            .collect();
        for hash in &expired {
            if let Some(stale) = entries.remove(hash) {
                debug!(
                    id = stale.content().id,
                    hash = %short_hash(hash),
                    expiration = stale.content().expiration,
                    "expiring notice"
                );
                sink.notice_changed(hash, ChangeType::Deleted);
            }
        }

        let hash = notice.hash();
        entries.insert(hash, notice);
        sink.notice_changed(&hash, ChangeType::New);

        Ok(expired.len())
    }
}

impl Default for NoticeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{accepted_notice, RecordingSink};

    #[test]
    fn test_insert_and_get() {
        let store = NoticeStore::new();
        let sink = RecordingSink::default();
        let notice = accepted_notice(1, 1_000, 1_010, 1_100, 0);
        let hash = notice.hash();

        assert_eq!(store.sweep_and_insert(notice.clone(), 1_000, &sink).unwrap(), 0);
        assert_eq!(store.get(&hash).unwrap(), Some(notice));
        assert_eq!(sink.events(), vec![(hash, ChangeType::New)]);
    }

    #[test]
    fn test_get_missing() {
        let store = NoticeStore::new();
        assert_eq!(store.get(&[0u8; 32]).unwrap(), None);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let store = NoticeStore::new();
        let sink = RecordingSink::default();
        let short = accepted_notice(1, 1_000, 1_010, 1_050, 0);
        let long = accepted_notice(2, 1_000, 1_010, 2_000, 0);
        let fresh = accepted_notice(3, 1_000, 1_010, 3_000, 0);
        store.sweep_and_insert(short.clone(), 1_000, &sink).unwrap();
        store.sweep_and_insert(long.clone(), 1_000, &sink).unwrap();

        let removed = store.sweep_and_insert(fresh.clone(), 1_050, &sink).unwrap();
        assert_eq!(removed, 1);
        assert!(!store.contains(&short.hash()).unwrap());
        assert!(store.contains(&long.hash()).unwrap());
        assert!(store.contains(&fresh.hash()).unwrap());

        let events = sink.events();
        assert_eq!(events[2], (short.hash(), ChangeType::Deleted));
        assert_eq!(events[3], (fresh.hash(), ChangeType::New));
    }

    #[test]
    fn test_reinsert_same_hash_overwrites() {
        let store = NoticeStore::new();
        let sink = RecordingSink::default();
        let notice = accepted_notice(1, 1_000, 1_010, 1_100, 0);
        store.sweep_and_insert(notice.clone(), 1_000, &sink).unwrap();
        store.sweep_and_insert(notice.clone(), 1_001, &sink).unwrap();
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.get(&notice.hash()).unwrap(), Some(notice));
    }

    #[test]
    fn test_expired_entry_still_retrievable_until_sweep() {
        let store = NoticeStore::new();
        let sink = RecordingSink::default();
        let notice = accepted_notice(1, 1_000, 1_010, 1_100, 0);
        store.sweep_and_insert(notice.clone(), 1_000, &sink).unwrap();
        // Lookups do not sweep.
        assert!(store.get(&notice.hash()).unwrap().is_some());
    }

    #[test]
    fn test_snapshot_orders_by_priority() {
        let store = NoticeStore::new();
        let sink = RecordingSink::default();
        store
            .sweep_and_insert(accepted_notice(1, 1_000, 1_010, 1_100, 1), 1_000, &sink)
            .unwrap();
        store
            .sweep_and_insert(accepted_notice(2, 1_000, 1_010, 1_100, 9), 1_000, &sink)
            .unwrap();
        store
            .sweep_and_insert(accepted_notice(3, 1_000, 1_010, 1_100, 4), 1_000, &sink)
            .unwrap();
        let ids: Vec<i32> = store
            .snapshot()
            .unwrap()
            .iter()
            .map(|n| n.content().id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_concurrent_inserts() {
        use std::sync::Arc;

        let store = Arc::new(NoticeStore::new());
        let sink = Arc::new(RecordingSink::default());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                let sink = Arc::clone(&sink);
                std::thread::spawn(move || {
                    let notice = accepted_notice(i, 1_000, 1_010, 1_100, 0);
                    store.sweep_and_insert(notice, 1_000, sink.as_ref()).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len().unwrap(), 8);
        assert_eq!(sink.events().len(), 8);
    }
}
