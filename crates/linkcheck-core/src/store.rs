use crate::batch::{BatchResult, RequestId};
use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Keyed storage for batch results.
///
/// Implementations must allow concurrent readers while serializing writers.
#[async_trait]
pub trait ResultStore: Send + Sync + 'static {
    /// Stores a result under its request id, replacing any existing entry.
    async fn save(&self, result: BatchResult) -> Result<()>;

    /// Returns the subset of `ids` that exist in the store.
    ///
    /// Absent ids are simply omitted; an empty slice yields an empty map.
    async fn get(&self, ids: &[RequestId]) -> Result<HashMap<RequestId, BatchResult>>;

    /// Returns the highest stored request id, if any.
    async fn last_id(&self) -> Result<Option<RequestId>>;
}
