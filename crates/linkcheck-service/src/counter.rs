use linkcheck_core::RequestId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic source of request ids.
///
/// Each call to [`next`](Self::next) returns a value strictly greater than
/// every value handed out before, including under concurrent use. A fresh
/// counter hands out `1` first.
#[derive(Debug, Default)]
pub struct RequestCounter {
    last: AtomicU64,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a counter that continues after `last`.
    ///
    /// Useful for resuming from ids already present in a durable store.
    pub fn with_offset(last: RequestId) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }

    /// Reserves the next id. Reserved ids are never handed out again.
    pub fn next(&self) -> RequestId {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns the most recently reserved id, or the offset if none was
    /// reserved yet.
    pub fn current(&self) -> RequestId {
        self.last.load(Ordering::SeqCst)
    }
}
