//! Pipeline error type shared by every stage.

use crate::validation::ValidationReport;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing column `{column}`")]
    MissingColumn { column: String },

    /// Lazy schema validation found one or more failure cases
    #[error("schema validation failed with {} failure case(s)", .0.failures.len())]
    Validation(ValidationReport),

    #[error("row {row}: unknown Attrition label `{value}`")]
    UnknownLabel { row: usize, value: String },

    #[error("row {row}: missing value in column `{column}`")]
    MissingValue { row: usize, column: String },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("feature columns do not match: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
