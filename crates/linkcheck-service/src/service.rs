use crate::counter::RequestCounter;
use crate::error::{Result, ServiceError};
use async_trait::async_trait;
use linkcheck_core::{BatchResult, Prober, RequestId, ResultStore, ValidationError};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// A rendered report ready to be sent to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub content_type: &'static str,
    pub file_name: &'static str,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait LinkChecker: Send + Sync + 'static {
    /// Probes every link of a batch and stores the result under a new id.
    async fn submit(&self, links: Vec<String>) -> Result<BatchResult>;

    /// Renders the stored batches for `ids` into a single document.
    ///
    /// Fails with [`ServiceError::NotFound`] naming every absent id.
    async fn report(&self, ids: &[RequestId]) -> Result<Report>;
}

/// Coordinates probing, id assignment and storage of link batches.
///
/// Links of one batch are probed sequentially in submission order. The
/// request id is reserved before probing starts and is never handed out
/// again, even when probing or storage fails afterwards.
#[derive(Debug)]
pub struct LinkCheckService<S, P> {
    store: Arc<S>,
    prober: Arc<P>,
    counter: RequestCounter,
}

impl<S: ResultStore, P: Prober> LinkCheckService<S, P> {
    /// Creates a service whose first assigned id is `1`.
    pub fn new(store: S, prober: P) -> Self {
        Self::with_counter(store, prober, RequestCounter::new())
    }

    pub fn with_counter(store: S, prober: P, counter: RequestCounter) -> Self {
        Self {
            store: Arc::new(store),
            prober: Arc::new(prober),
            counter,
        }
    }

    /// Creates a service that continues numbering after the highest id
    /// already present in `store`.
    pub async fn resume(store: S, prober: P) -> Result<Self> {
        let last = store.last_id().await?.unwrap_or_default();
        debug!(last_id = last, "resuming request numbering");
        Ok(Self::with_counter(
            store,
            prober,
            RequestCounter::with_offset(last),
        ))
    }

    /// Returns the most recently assigned request id.
    pub fn last_assigned(&self) -> RequestId {
        self.counter.current()
    }
}

#[async_trait]
impl<S: ResultStore, P: Prober> LinkChecker for LinkCheckService<S, P> {
    async fn submit(&self, links: Vec<String>) -> Result<BatchResult> {
        if links.is_empty() {
            return Err(ValidationError::EmptyBatch.into());
        }

        let request_id = self.counter.next();
        trace!(request_id, links = links.len(), "checking batch");

        let mut result = BatchResult::new(request_id);
        for link in links {
            let verdict = self.prober.check(&link).await.map_err(|e| {
                debug!(request_id, link = %link, error = %e, "rejecting batch");
                e
            })?;
            result.record(link, verdict);
        }

        self.store.save(result.clone()).await?;

        let available = result.verdicts.values().filter(|v| v.is_available()).count();
        info!(
            request_id,
            links = result.len(),
            available,
            "batch checked"
        );
        Ok(result)
    }

    async fn report(&self, ids: &[RequestId]) -> Result<Report> {
        if ids.is_empty() {
            return Err(ValidationError::EmptyRequest.into());
        }

        let found = self.store.get(ids).await?;

        let mut seen = HashSet::new();
        let missing: Vec<RequestId> = ids
            .iter()
            .copied()
            .filter(|id| !found.contains_key(id) && seen.insert(*id))
            .collect();
        if !missing.is_empty() {
            warn!(?missing, "some request numbers not found");
            return Err(ServiceError::NotFound { missing });
        }

        let body = linkcheck_report::render(&found)?;
        debug!(batches = found.len(), bytes = body.len(), "report rendered");

        Ok(Report {
            content_type: linkcheck_report::CONTENT_TYPE,
            file_name: linkcheck_report::FILE_NAME,
            body,
        })
    }
}
