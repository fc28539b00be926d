//! Detector Error Types
//!
//! One error enum for the whole scoring pipeline. Nothing is retried and
//! nothing falls back to a default: every failure is surfaced to the caller.

use thiserror::Error;

/// Errors produced by feature derivation, the outlier model and the detector.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model not trained: call train() or load() before predict()/save()")]
    ModelNotTrained,

    #[error("Model artifact corrupt: {0}")]
    ArtifactCorrupt(String),

    #[error("Division by zero: {field} is 0{}", reading_suffix(.reading))]
    DivisionByZero {
        field: &'static str,
        reading: Option<usize>,
    },

    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization Error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for detector operations.
pub type Result<T> = std::result::Result<T, DetectorError>;

fn reading_suffix(reading: &Option<usize>) -> String {
    reading.map(|i| format!(" (reading {})", i)).unwrap_or_default()
}

impl DetectorError {
    /// Attach a batch position. `InvalidInput` keeps a single prefix.
    pub(crate) fn at_reading(self, index: usize) -> Self {
        match self {
            DetectorError::InvalidInput(msg) => {
                DetectorError::InvalidInput(format!("reading {}: {}", index, msg))
            }
            DetectorError::DivisionByZero { field, .. } => DetectorError::DivisionByZero {
                field,
                reading: Some(index),
            },
            other => other,
        }
    }

    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        DetectorError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
