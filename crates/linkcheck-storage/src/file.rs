use crate::memory::{InMemoryStore, Snapshot};
use async_trait::async_trait;
use linkcheck_core::store::{Result, ResultStore};
use linkcheck_core::{BatchResult, RequestId, StorageError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const TEMP_PREFIX: &str = ".linkcheck-";
const TEMP_SUFFIX: &str = ".tmp";

/// Durable result store persisted as a single JSON file.
///
/// Every save rewrites the full snapshot to a temporary file in the target's
/// directory and renames it over the target, so the file always holds either
/// the previous or the new complete state. The in-memory copy is only updated
/// once the rename has succeeded. Reads are served from memory.
///
/// A save runs on the blocking pool and finishes even when the caller stops
/// waiting for it, so disk and memory never disagree.
///
/// The file is a JSON object keyed by the string-encoded request id, e.g.
/// `{"1": {"links": {"google.com": "available"}, "links_num": 1}}`.
#[derive(Debug)]
pub struct FileStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    memory: InMemoryStore,
    path: PathBuf,
    // Held from snapshot to memory update; the file follows save order.
    persist_lock: Mutex<()>,
}

impl FileStore {
    /// Opens the store at `path`, loading any existing snapshot.
    ///
    /// A missing or empty file yields an empty store. A file that cannot be
    /// parsed, or a path that points at a directory, is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = load_snapshot(&path)?;
        let memory = InMemoryStore::from_snapshot(snapshot);

        info!(path = %path.display(), batches = memory.len(), "opened file store");

        Ok(Self {
            inner: Arc::new(Inner {
                memory,
                path,
                persist_lock: Mutex::new(()),
            }),
        })
    }

    pub fn len(&self) -> usize {
        self.inner.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.memory.is_empty()
    }
}

impl Inner {
    fn persist(&self, result: BatchResult) -> Result<()> {
        let _guard = self.persist_lock.lock();

        let request_id = result.request_id;
        let mut snapshot = self.memory.snapshot();
        snapshot.insert(request_id, result.clone());

        let bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        write_atomically(&self.path, &bytes)?;

        self.memory.insert(result);
        debug!(request_id, batches = snapshot.len(), path = %self.path.display(), "persisted snapshot");
        Ok(())
    }
}

#[async_trait]
impl ResultStore for FileStore {
    async fn save(&self, result: BatchResult) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.persist(result))
            .await
            .map_err(|e| StorageError::Io(format!("persist task failed: {e}")))?
    }

    async fn get(&self, ids: &[RequestId]) -> Result<HashMap<RequestId, BatchResult>> {
        Ok(self.inner.memory.lookup(ids))
    }

    async fn last_id(&self) -> Result<Option<RequestId>> {
        Ok(self.inner.memory.max_id())
    }
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            return Err(StorageError::InvalidData(format!(
                "store path is a directory: {}",
                path.display()
            )));
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Snapshot::new()),
        Err(e) => return Err(e.into()),
    }

    let bytes = std::fs::read(path)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Snapshot::new());
    }

    let snapshot: Snapshot = serde_json::from_slice(&bytes)
        .map_err(|e| StorageError::InvalidData(format!("{}: {e}", path.display())))?;

    if let Some((key, result)) = snapshot
        .iter()
        .find(|(key, result)| **key != result.request_id)
    {
        return Err(StorageError::InvalidData(format!(
            "entry {key} holds links_num {}",
            result.request_id
        )));
    }

    // New ids continue after the highest stored one.
    if snapshot.contains_key(&RequestId::MAX) {
        return Err(StorageError::InvalidData(format!(
            "links_num {} leaves no room for new requests",
            RequestId::MAX
        )));
    }

    Ok(snapshot)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Unpersisted temp files are removed when dropped.
    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StorageError::Io(e.error.to_string()))?;

    Ok(())
}
