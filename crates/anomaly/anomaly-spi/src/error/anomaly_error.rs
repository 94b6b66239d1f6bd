//! Anomaly detection error types.

use thiserror::Error;

/// Anomaly detection errors.
///
/// Detectors never fail: insufficient history and zero dispersion are
/// ordinary outcomes. Errors only arise at the boundaries (configuration,
/// the stream source and the verdict sink).
#[derive(Debug, Error)]
pub enum AnomalyError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Stream exhausted after {steps} steps")]
    StreamExhausted { steps: u64 },

    #[error("Non-finite value {value} rejected at step {step}")]
    NonFiniteValue { step: u64, value: f64 },

    #[error("Sink error: {0}")]
    Sink(String),
}

impl AnomalyError {
    /// Shorthand for an `InvalidParameter` error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// True when the error is the end-of-stream termination signal.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::StreamExhausted { .. })
    }
}

/// Result type for anomaly detection operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;
