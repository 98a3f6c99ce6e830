use crate::batch::Verdict;
use crate::error::ValidationError;
use async_trait::async_trait;

#[async_trait]
pub trait Prober: Send + Sync + 'static {
    /// Checks a single link and returns its availability.
    ///
    /// Only structurally invalid input is an error. A probe that never
    /// reaches a server yields [`Verdict::NotAvailable`].
    async fn check(&self, link: &str) -> Result<Verdict, ValidationError>;
}
