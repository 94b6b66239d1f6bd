//! Alert types for anomaly detection.

use serde::{Deserialize, Serialize};

/// Alert severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    /// One detector flagged the value.
    Warning,
    /// Both detectors flagged the value.
    Critical,
}

/// An alert raised for an anomalous verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub timestamp: u64,
    pub step: u64,
    pub value: f64,
    pub zscore: f64,
    pub mad_score: f64,
    pub severity: AlertSeverity,
    pub message: String,
}
