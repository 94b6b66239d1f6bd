//! Anomaly Detection Service Provider Interface
//!
//! Defines traits and types for windowed stream anomaly detection.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{StreamSource, VerdictSink, WindowDetector};
pub use error::{AnomalyError, Result};
pub use model::{
    Alert, AlertSeverity, DetectionResult, DetectorKind, Verdict, VerdictLog, WindowSnapshot,
};
