use crate::metrics::Column;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapperError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema Mismatch: missing column(s) {}", .missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    #[error("Invalid Weights: {0}")]
    InvalidWeights(String),

    #[error("Degenerate Column: every value of '{column}' is identical")]
    DegenerateColumn { column: Column },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type MapperResult<T> = Result<T, MapperError>;
