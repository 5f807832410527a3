//! Model error types

use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("model file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("row {row}: label must be 0 or 1, got {label}")]
    InvalidLabel { row: usize, label: f64 },

    #[error("row {row}: feature values must be finite")]
    NonFiniteFeature { row: usize },

    #[error("expected {expected} features, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("{labels} labels but {scores} scores")]
    LengthMismatch { labels: usize, scores: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("corrupt model: {0}")]
    CorruptModel(String),
}
