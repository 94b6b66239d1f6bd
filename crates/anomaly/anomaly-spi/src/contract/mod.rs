//! Contract definitions for anomaly detection.
//!
//! This module contains trait definitions that providers must implement.

mod stream;
mod window_detector;

pub use stream::{StreamSource, VerdictSink};
pub use window_detector::WindowDetector;
