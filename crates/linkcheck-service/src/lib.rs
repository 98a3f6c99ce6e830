//! Batch coordinator for the linkcheck service.
//!
//! [`LinkCheckService`] assigns request ids, probes submitted links through a
//! [`Prober`](linkcheck_core::Prober), stores the results in a
//! [`ResultStore`](linkcheck_core::ResultStore) and renders reports over
//! stored batches.

pub mod counter;
pub mod error;
pub mod service;

pub use counter::RequestCounter;
pub use error::ServiceError;
pub use service::{LinkCheckService, LinkChecker, Report};
