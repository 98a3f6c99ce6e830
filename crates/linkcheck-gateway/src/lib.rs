//! HTTP gateway for the linkcheck service.
//!
//! Thin axum adapter: decodes requests, calls into a
//! [`LinkChecker`](linkcheck_service::LinkChecker) and maps its outcomes to
//! status codes.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
