use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Identifier assigned to a submitted batch.
pub type RequestId = u64;

/// Availability outcome for a single link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "not available")]
    NotAvailable,
}

impl Verdict {
    /// Maps a final HTTP status code to a verdict.
    ///
    /// Anything in `[200, 400)` counts as available.
    pub fn from_status(status: u16) -> Self {
        if (200..400).contains(&status) {
            Verdict::Available
        } else {
            Verdict::NotAvailable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Available => "available",
            Verdict::NotAvailable => "not available",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Verdict::Available)
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of checking one submitted group of links.
///
/// Links are keyed by their text as submitted. A result is never modified
/// after it has been saved; saving the same id again replaces it entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    #[serde(rename = "links_num")]
    pub request_id: RequestId,
    #[serde(rename = "links")]
    pub verdicts: BTreeMap<String, Verdict>,
}

impl BatchResult {
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            verdicts: BTreeMap::new(),
        }
    }

    /// Records a verdict, replacing any earlier verdict for the same link.
    pub fn record(&mut self, link: impl Into<String>, verdict: Verdict) {
        self.verdicts.insert(link.into(), verdict);
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}
