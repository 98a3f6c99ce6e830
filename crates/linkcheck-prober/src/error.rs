use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProberError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}
