mod health;
mod links;

pub use health::HealthResponse;
pub use links::{CreateLinksRequest, CreateLinksResponse, ReportRequest};
