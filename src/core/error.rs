use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DashError {
    #[error("Cannot parse config: {0}")]
    ConfigParsingError(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Schema error: {0}")]
    SchemaError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("No data found for: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Arrow error: {0}")]
    ArrowError(String),
    #[error("Table error: {0}")]
    TableError(String),
}

impl From<std::io::Error> for DashError {
    fn from(err: std::io::Error) -> Self {
        DashError::IoError(err.to_string())
    }
}

impl From<arrow::error::ArrowError> for DashError {
    fn from(err: arrow::error::ArrowError) -> Self {
        DashError::ArrowError(err.to_string())
    }
}

impl From<csv::Error> for DashError {
    fn from(err: csv::Error) -> Self {
        DashError::ParseError(err.to_string())
    }
}
