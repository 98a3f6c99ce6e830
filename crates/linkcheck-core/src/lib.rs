//! Core types and traits for the linkcheck service.
//!
//! This crate provides the batch data model, the error taxonomy and the
//! capability traits shared by the prober, the result stores and the
//! batch coordinator.

pub mod batch;
pub mod error;
pub mod prober;
pub mod store;

pub use batch::{BatchResult, RequestId, Verdict};
pub use error::{RenderError, StorageError, ValidationError};
pub use prober::Prober;
pub use store::ResultStore;
