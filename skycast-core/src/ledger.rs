//! The recent-searches ledger: a bounded, deduplicated, most-recent-first
//! list of city names, persisted whole after every mutation.

use crate::store::KvStore;
use std::sync::Arc;

/// Store key holding the serialized ledger (a JSON string array).
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";

/// Maximum number of retained searches.
pub const CAPACITY: usize = 5;

pub struct SearchLedger {
    entries: Vec<String>,
    store: Arc<dyn KvStore>,
}

impl SearchLedger {
    /// Load the persisted ledger. Missing or malformed data loads as an
    /// empty ledger, never an error.
    pub fn load(store: Arc<dyn KvStore>) -> Self {
        let entries = store
            .get(RECENT_SEARCHES_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Self { entries, store }
    }

    /// Record a search: move `city` to the front (removing any equal entry
    /// first), evict past capacity, persist, and return the new state.
    ///
    /// Entry identity is case-sensitive exact match; no normalization.
    pub fn record(&mut self, city: &str) -> &[String] {
        self.entries.retain(|entry| entry != city);
        self.entries.insert(0, city.to_string());
        self.entries.truncate(CAPACITY);
        self.persist();
        &self.entries
    }

    /// Current in-memory state, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    // Replace-on-write; a persistence failure keeps the in-memory state.
    fn persist(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(raw) => {
                if let Err(err) = self.store.set(RECENT_SEARCHES_KEY, &raw) {
                    tracing::warn!(error = %err, "failed to persist recent searches");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to serialize recent searches"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};

    fn ledger() -> SearchLedger {
        SearchLedger::load(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn re_recording_moves_entry_to_front() {
        let mut ledger = ledger();
        ledger.record("A");
        ledger.record("B");
        ledger.record("A");

        assert_eq!(ledger.entries(), ["A", "B"]);
    }

    #[test]
    fn recording_past_capacity_evicts_the_oldest() {
        let mut ledger = ledger();
        for city in ["A", "B", "C", "D", "E", "F"] {
            ledger.record(city);
        }

        assert_eq!(ledger.entries(), ["F", "E", "D", "C", "B"]);
    }

    #[test]
    fn ledger_never_exceeds_capacity_or_duplicates() {
        let mut ledger = ledger();
        for i in 0..40 {
            ledger.record(&format!("city-{}", i % 7));

            assert!(ledger.entries().len() <= CAPACITY);
            let mut seen = ledger.entries().to_vec();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), ledger.entries().len());
        }
    }

    #[test]
    fn identity_is_case_sensitive() {
        let mut ledger = ledger();
        ledger.record("oslo");
        ledger.record("Oslo");

        assert_eq!(ledger.entries(), ["Oslo", "oslo"]);
    }

    #[test]
    fn malformed_persisted_data_loads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(RECENT_SEARCHES_KEY, "not valid json").expect("set");

        let ledger = SearchLedger::load(store);
        assert!(ledger.entries().is_empty());
    }

    #[test]
    fn recorded_entries_survive_reload_from_the_same_store() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());

        let mut ledger = SearchLedger::load(Arc::clone(&store));
        ledger.record("Oslo");
        ledger.record("Bergen");
        drop(ledger);

        let ledger = SearchLedger::load(store);
        assert_eq!(ledger.entries(), ["Bergen", "Oslo"]);
    }

    struct FailingStore;

    impl KvStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn persistence_failure_keeps_in_memory_state() {
        let mut ledger = SearchLedger::load(Arc::new(FailingStore));
        ledger.record("Oslo");

        assert_eq!(ledger.entries(), ["Oslo"]);
    }
}
