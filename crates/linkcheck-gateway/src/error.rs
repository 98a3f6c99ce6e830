use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkcheck_service::ServiceError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                warn!(error = %message, "rejecting request body");
                error_response(StatusCode::BAD_REQUEST, &message)
            }
            AppError::Service(ServiceError::Validation(e)) => {
                error_response(StatusCode::BAD_REQUEST, &e.to_string())
            }
            AppError::Service(ServiceError::NotFound { missing }) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "some request numbers not found",
                    "missing": missing,
                })),
            )
                .into_response(),
            AppError::Service(ServiceError::Storage(e)) => {
                error!(error = %e, "storage failure");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage failure")
            }
            AppError::Service(ServiceError::Render(e)) => {
                error!(error = %e, "report rendering failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "report rendering failed")
            }
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
