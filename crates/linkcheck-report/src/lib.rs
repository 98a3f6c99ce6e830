//! Deterministic plain-text report over stored batch results.
//!
//! Batches are laid out in ascending request id order and links within a
//! batch in ascending lexicographic order, so identical input always
//! produces byte-identical output:
//!
//! ```text
//! Links report
//!
//! Request #1
//! google.com - available
//! ya.ru - not available
//!
//! Request #2
//! example.com - available
//! ```

use linkcheck_core::{BatchResult, RenderError, RequestId};
use std::collections::HashMap;
use std::fmt::Write;
use tracing::trace;

/// Media type of the rendered document.
pub const CONTENT_TYPE: &str = "text/plain; charset=utf-8";
/// Suggested download name for the rendered document.
pub const FILE_NAME: &str = "report.txt";

const TITLE: &str = "Links report";

/// Renders `results` into a single document.
///
/// Batch headers use the map key as the request id.
pub fn render(results: &HashMap<RequestId, BatchResult>) -> Result<Vec<u8>, RenderError> {
    let mut ids: Vec<RequestId> = results.keys().copied().collect();
    ids.sort_unstable();

    let mut doc = String::new();
    write_document(&mut doc, &ids, results).map_err(|e| RenderError(e.to_string()))?;

    trace!(batches = ids.len(), bytes = doc.len(), "rendered report");
    Ok(doc.into_bytes())
}

fn write_document(
    doc: &mut String,
    ids: &[RequestId],
    results: &HashMap<RequestId, BatchResult>,
) -> std::fmt::Result {
    writeln!(doc, "{TITLE}")?;

    for id in ids {
        let result = &results[id];
        writeln!(doc)?;
        writeln!(doc, "Request #{id}")?;
        // verdicts is a BTreeMap, so links come out sorted
        for (link, verdict) in &result.verdicts {
            writeln!(doc, "{link} - {verdict}")?;
        }
    }

    Ok(())
}
