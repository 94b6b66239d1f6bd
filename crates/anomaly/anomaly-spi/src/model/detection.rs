//! Per-detector result types and the window view detectors read from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies which detector produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    ZScore,
    Mad,
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorKind::ZScore => write!(f, "z-score"),
            DetectorKind::Mad => write!(f, "mad"),
        }
    }
}

/// Outcome of one detector for one candidate value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Whether the score crossed the detector threshold.
    pub is_anomaly: bool,
    /// Detector score (signed for z-score, non-negative for MAD).
    pub score: f64,
}

impl DetectionResult {
    /// Create a new detection result.
    pub fn new(is_anomaly: bool, score: f64) -> Self {
        Self { is_anomaly, score }
    }

    /// The non-anomalous, zero-score outcome used during warm-up and for
    /// windows without dispersion.
    pub fn clear() -> Self {
        Self::new(false, 0.0)
    }
}

impl Default for DetectionResult {
    fn default() -> Self {
        Self::clear()
    }
}

/// Read-only view of the trailing window handed to detectors.
///
/// Carries the window capacity so detectors can tell warm-up apart from a
/// full window.
#[derive(Debug, Clone, Copy)]
pub struct WindowSnapshot<'a> {
    values: &'a [f64],
    capacity: usize,
}

impl<'a> WindowSnapshot<'a> {
    /// Create a snapshot over `values` for a window of the given capacity.
    pub fn new(values: &'a [f64], capacity: usize) -> Self {
        Self { values, capacity }
    }

    /// Observations in arrival order, oldest first.
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once the window holds `capacity` observations.
    pub fn is_warm(&self) -> bool {
        self.values.len() >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_result() {
        let result = DetectionResult::clear();
        assert!(!result.is_anomaly);
        assert_eq!(result.score, 0.0);
        assert_eq!(result, DetectionResult::default());
    }

    #[test]
    fn test_snapshot_warm_up() {
        let values = [1.0, 2.0, 3.0];
        let partial = WindowSnapshot::new(&values, 4);
        assert!(!partial.is_warm());
        assert_eq!(partial.len(), 3);

        let full = WindowSnapshot::new(&values, 3);
        assert!(full.is_warm());
        assert_eq!(full.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_detector_kind_display() {
        assert_eq!(DetectorKind::ZScore.to_string(), "z-score");
        assert_eq!(DetectorKind::Mad.to_string(), "mad");
    }
}
