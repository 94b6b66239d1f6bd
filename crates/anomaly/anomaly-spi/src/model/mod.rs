//! Data models for anomaly detection.
//!
//! This module contains data structures used throughout the anomaly detection system.

mod alert;
mod detection;
mod verdict;

pub use alert::{Alert, AlertSeverity};
pub use detection::{DetectionResult, DetectorKind, WindowSnapshot};
pub use verdict::{Verdict, VerdictLog};
