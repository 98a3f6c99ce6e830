use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_links_handler, health_handler, report_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/links", post(create_links_handler))
            .route("/links_num", get(report_handler).post(report_handler))
            .with_state(state)
    }

    /// The router with request tracing and a whole-request timeout.
    ///
    /// A request that hits the timeout is dropped, cancelling any probes it
    /// still has in flight.
    pub fn with_layers(state: AppState, request_timeout: Duration) -> Router {
        Self::router(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                request_timeout,
            ))
            .layer(TraceLayer::new_for_http())
    }
}
