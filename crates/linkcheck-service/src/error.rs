use linkcheck_core::{RenderError, RequestId, StorageError, ValidationError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("request numbers not found: {missing:?}")]
    NotFound { missing: Vec<RequestId> },
}
