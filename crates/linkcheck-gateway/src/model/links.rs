use linkcheck_core::{BatchResult, RequestId, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct CreateLinksRequest {
    pub links: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLinksResponse {
    pub links: BTreeMap<String, Verdict>,
    pub links_num: RequestId,
}

impl From<BatchResult> for CreateLinksResponse {
    fn from(result: BatchResult) -> Self {
        Self {
            links: result.verdicts,
            links_num: result.request_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub links_list: Vec<RequestId>,
}
