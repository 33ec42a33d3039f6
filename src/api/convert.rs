use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float64Type, Int32Type};
use arrow::ipc::writer::StreamWriter;
use arrow::record_batch::RecordBatch;
use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::Response;
use serde_json::Value;

use crate::core::LABEL_KEY;

use super::error::ApiError;
use super::types::{ColumnData, RecordsResponseJson};

/// Arrow IPC content type.
pub const ARROW_IPC_CONTENT_TYPE: &str = "application/vnd.apache.arrow.stream";

/// Serialize a RecordBatch to Arrow IPC streaming format.
pub fn arrow_ipc_response(batch: &RecordBatch) -> Result<Response, ApiError> {
    let mut buffer = Vec::new();
    {
        let mut writer = StreamWriter::try_new(&mut buffer, &batch.schema())
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        writer
            .write(batch)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| ApiError::Internal(e.to_string()))?;
    }

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, ARROW_IPC_CONTENT_TYPE)
        .body(Body::from(buffer))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Serialize a RecordBatch to column-oriented JSON.
pub fn json_response(batch: &RecordBatch) -> Result<Response, ApiError> {
    let schema = batch.schema();
    let num_rows = batch.num_rows();

    let columns = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| -> Result<ColumnData, ApiError> {
            let values = array_to_json_values(batch.column(idx).as_ref())?;
            let label = field
                .metadata()
                .get(LABEL_KEY)
                .cloned()
                .unwrap_or_else(|| field.name().clone());
            Ok(ColumnData {
                name: field.name().clone(),
                label,
                values,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    let response = RecordsResponseJson { num_rows, columns };
    let json = serde_json::to_string(&response).map_err(|e| ApiError::Internal(e.to_string()))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

fn array_to_json_values(array: &dyn Array) -> Result<Vec<Value>, ApiError> {
    let value_at = |idx: usize| -> Value {
        if array.is_null(idx) {
            return Value::Null;
        }
        match array.data_type() {
            DataType::Utf8 => Value::String(array.as_string::<i32>().value(idx).to_string()),
            DataType::Int32 => Value::from(array.as_primitive::<Int32Type>().value(idx)),
            DataType::Float64 => {
                serde_json::Number::from_f64(array.as_primitive::<Float64Type>().value(idx))
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
            _ => Value::Null,
        }
    };

    match array.data_type() {
        DataType::Utf8 | DataType::Int32 | DataType::Float64 => {
            Ok((0..array.len()).map(value_at).collect())
        }
        other => Err(ApiError::Internal(format!(
            "unsupported array type: {other:?}"
        ))),
    }
}
