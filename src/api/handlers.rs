use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::http::header::ACCEPT;
use axum::response::Response;

use crate::dashboard::Dashboard;
use crate::service::{SalaryService, Summary};

use super::convert::{ARROW_IPC_CONTENT_TYPE, arrow_ipc_response, json_response};
use super::error::ApiError;
use super::types::{HealthResponse, SearchParams};

/// GET /health
pub async fn health(State(service): State<Arc<SalaryService>>) -> Json<HealthResponse> {
    let table = service.table();
    Json(HealthResponse {
        status: "healthy".to_string(),
        rows_loaded: table.num_rows(),
        years: table.distinct_years(),
    })
}

/// GET /api/v1/dashboard?q=<text>
///
/// Company info and chart panels for the query. A blank query returns the
/// idle state; a query without matches is a 404 carrying the message to show.
pub async fn dashboard(
    State(service): State<Arc<SalaryService>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Dashboard>, ApiError> {
    let query = params.q.unwrap_or_default();
    match service.dashboard(&query)? {
        Dashboard::NotFound { message, .. } => Err(ApiError::NotFound(message)),
        dashboard => Ok(Json(dashboard)),
    }
}

/// GET /api/v1/records?q=<text>
///
/// Matched rows across all years, as JSON or as an Arrow IPC stream
/// depending on the Accept header.
pub async fn records(
    State(service): State<Arc<SalaryService>>,
    Query(params): Query<SearchParams>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let query = params.q.unwrap_or_default();
    let matched = service.search(&query)?;

    let wants_arrow = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|s| s.contains(ARROW_IPC_CONTENT_TYPE));

    if wants_arrow {
        arrow_ipc_response(matched.batch())
    } else {
        json_response(matched.batch())
    }
}

/// GET /api/v1/summary
pub async fn summary(State(service): State<Arc<SalaryService>>) -> Json<Summary> {
    Json(service.summary())
}
