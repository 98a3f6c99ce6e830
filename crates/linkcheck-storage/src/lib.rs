//! Result store implementations.
//!
//! [`InMemoryStore`] keeps batches in process memory only. [`FileStore`]
//! layers whole-snapshot JSON persistence on top of it, replacing the file
//! atomically on every save.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use linkcheck_core::store::{Result, ResultStore};
pub use linkcheck_core::StorageError;
pub use memory::{InMemoryStore, Snapshot};
