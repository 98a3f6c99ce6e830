use crate::error::Result;
use crate::model::{CreateLinksRequest, CreateLinksResponse, ReportRequest};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::debug;

/// Checks the submitted links and stores the verdicts under a new request
/// number.
pub async fn create_links_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateLinksRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateLinksResponse>)> {
    let Json(request) = payload?;
    debug!(links = request.links.len(), "received batch");

    let result = state.checker().submit(request.links).await?;
    Ok((StatusCode::CREATED, Json(result.into())))
}

/// Returns the rendered report for previously stored request numbers.
pub async fn report_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload?;

    let report = state.checker().report(&request.links_list).await?;
    let headers = [
        (header::CONTENT_TYPE, report.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", report.file_name),
        ),
    ];
    Ok((StatusCode::OK, headers, report.body).into_response())
}
