use discount_core::store::{Result, SnapshotStore};
use discount_core::{CodeSet, StorageError};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct State {
    snapshot: Option<CodeSet>,
    saves: usize,
}

/// In-memory implementation of the SnapshotStore trait.
///
/// Clones share the same snapshot, so a test can hand one clone to a
/// registry and reopen another registry from a second clone to simulate a
/// restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    /// Creates an empty store; `load` reports `NotFound` until the first save.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds the given snapshot.
    pub fn with_snapshot(codes: CodeSet) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                snapshot: Some(codes),
                saves: 0,
            })),
        }
    }

    /// Returns a copy of the last saved snapshot, if any.
    pub fn snapshot(&self) -> Option<CodeSet> {
        self.state.lock().snapshot.clone()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.state.lock().saves
    }
}

impl SnapshotStore for InMemoryStore {
    fn load(&self) -> Result<CodeSet> {
        self.state
            .lock()
            .snapshot
            .clone()
            .ok_or_else(|| StorageError::NotFound("in-memory snapshot".to_string()))
    }

    fn save(&self, codes: &CodeSet) -> Result<()> {
        let mut state = self.state.lock();
        state.snapshot = Some(codes.clone());
        state.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discount_core::DiscountCode;

    fn set(codes: &[&str]) -> CodeSet {
        codes.iter().map(|c| DiscountCode::new(*c)).collect()
    }

    #[test]
    fn empty_store_reports_not_found() {
        let store = InMemoryStore::new();

        assert!(matches!(store.load(), Err(StorageError::NotFound(_))));
        assert!(store.snapshot().is_none());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn save_and_load() {
        let store = InMemoryStore::new();
        let codes = set(&["AAAAAAA", "BBBBBBB"]);

        store.save(&codes).unwrap();

        assert_eq!(store.load().unwrap(), codes);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn clones_share_snapshot() {
        let store = InMemoryStore::with_snapshot(set(&["AAAAAAA"]));
        let other = store.clone();

        store.save(&set(&["BBBBBBB"])).unwrap();

        assert_eq!(other.load().unwrap(), set(&["BBBBBBB"]));
        assert_eq!(other.save_count(), 1);
    }
}
