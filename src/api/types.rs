use serde::{Deserialize, Serialize};

/// Query string of the search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// JSON response format for matched records.
#[derive(Debug, Serialize)]
pub struct RecordsResponseJson {
    pub num_rows: usize,
    pub columns: Vec<ColumnData>,
}

/// Column data in the JSON response.
#[derive(Debug, Serialize)]
pub struct ColumnData {
    pub name: String,
    pub label: String,
    pub values: Vec<serde_json::Value>,
}

/// Error response format.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub rows_loaded: usize,
    pub years: Vec<i32>,
}
