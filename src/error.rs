//! Error types for the AgroYield engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for AgroYield operations
pub type Result<T> = std::result::Result<T, AgroError>;

/// Main error type for the AgroYield engine
#[derive(Error, Debug)]
pub enum AgroError {
    /// Training dataset is unusable: empty after cleaning, or a declared
    /// column is missing. Fatal for a training run; no artifact is written.
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Model artifact not found at {0}")]
    ArtifactMissing(PathBuf),

    #[error("Model artifact is corrupt: {0}")]
    ArtifactCorrupt(String),

    /// Client-supplied record is malformed (missing, mistyped, or
    /// out-of-domain field values). Reported per-request.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure inside the fitted regressor. Reported per-request
    /// as a server-side failure and logged with full context.
    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Model not fitted")]
    NotFitted,

    #[error("Invalid shape: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<polars::error::PolarsError> for AgroError {
    fn from(err: polars::error::PolarsError) -> Self {
        AgroError::Dataset(err.to_string())
    }
}

impl From<serde_json::Error> for AgroError {
    fn from(err: serde_json::Error) -> Self {
        AgroError::Serialization(err.to_string())
    }
}
