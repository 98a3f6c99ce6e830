use async_trait::async_trait;
use linkcheck_core::store::{Result, ResultStore};
use linkcheck_core::{BatchResult, RequestId};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// Ordered copy of every stored batch, as written to disk by [`FileStore`].
///
/// [`FileStore`]: crate::FileStore
pub type Snapshot = BTreeMap<RequestId, BatchResult>;

/// Volatile result store backed by a `HashMap` behind a reader/writer lock.
///
/// Saves take the lock exclusively; lookups share it, so concurrent reads
/// never block each other. Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    storage: RwLock<HashMap<RequestId, BatchResult>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            storage: RwLock::new(snapshot.into_iter().collect()),
        }
    }

    /// Returns an ordered copy of the current contents.
    pub fn snapshot(&self) -> Snapshot {
        self.storage
            .read()
            .iter()
            .map(|(id, result)| (*id, result.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.storage.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.read().is_empty()
    }

    pub(crate) fn insert(&self, result: BatchResult) {
        self.storage.write().insert(result.request_id, result);
    }

    pub(crate) fn lookup(&self, ids: &[RequestId]) -> HashMap<RequestId, BatchResult> {
        let storage = self.storage.read();
        ids.iter()
            .filter_map(|id| storage.get(id).map(|result| (*id, result.clone())))
            .collect()
    }

    pub(crate) fn max_id(&self) -> Option<RequestId> {
        self.storage.read().keys().max().copied()
    }
}

#[async_trait]
impl ResultStore for InMemoryStore {
    async fn save(&self, result: BatchResult) -> Result<()> {
        self.insert(result);
        Ok(())
    }

    async fn get(&self, ids: &[RequestId]) -> Result<HashMap<RequestId, BatchResult>> {
        Ok(self.lookup(ids))
    }

    async fn last_id(&self) -> Result<Option<RequestId>> {
        Ok(self.max_id())
    }
}
