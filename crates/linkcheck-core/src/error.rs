use thiserror::Error;

/// Caller-supplied input that is structurally invalid.
///
/// Each variant carries its own reason; no underlying parser error is
/// wrapped as the cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty url")]
    EmptyUrl,
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
    #[error("missing host")]
    MissingHost,
    #[error("empty batch")]
    EmptyBatch,
    #[error("empty request")]
    EmptyRequest,
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(String),
    #[error("storage serialization failed: {0}")]
    Serialization(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

#[derive(Debug, Clone, Error)]
#[error("report rendering failed: {0}")]
pub struct RenderError(pub String);
