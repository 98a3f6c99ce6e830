mod health;
mod links;

pub use health::health_handler;
pub use links::{create_links_handler, report_handler};
