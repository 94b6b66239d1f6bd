//! Window detector implementations.
//!
//! Both detectors score the candidate against the full window snapshot,
//! which already contains the candidate itself (see [`crate::StreamEvaluator`]).

use anomaly_api::{MadConfig, ZScoreConfig, DEFAULT_MAD_THRESHOLD, DEFAULT_Z_THRESHOLD};
use anomaly_spi::{
    AnomalyError, DetectionResult, DetectorKind, Result, WindowDetector, WindowSnapshot,
};

use crate::stats::{is_constant, mean, median_absolute_deviation, population_std_dev};

fn check_threshold(name: &str, threshold: f64) -> Result<()> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(AnomalyError::invalid_parameter(name, "must be positive"));
    }
    Ok(())
}

// ============================================================================
// Z-Score Detector
// ============================================================================

/// Z-Score based window detector.
///
/// Scores a value by its signed distance from the window mean in units of
/// the population standard deviation. The test is two-sided: `|z| > threshold`.
/// Windows whose values are all equal never flag. Finite values up to
/// `f64::MAX / 2` in magnitude are supported.
#[derive(Debug, Clone)]
pub struct ZScoreDetector {
    threshold: f64,
}

impl ZScoreDetector {
    /// Create a new Z-Score detector with given threshold.
    pub fn new(threshold: f64) -> Result<Self> {
        check_threshold("z_threshold", threshold)?;
        Ok(Self { threshold })
    }

    /// Create from configuration.
    pub fn from_config(config: ZScoreConfig) -> Result<Self> {
        Self::new(config.threshold)
    }
}

impl Default for ZScoreDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl WindowDetector for ZScoreDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::ZScore
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn evaluate(&self, value: f64, window: &WindowSnapshot<'_>) -> DetectionResult {
        if !window.is_warm() {
            return DetectionResult::clear();
        }

        let values = window.values();
        // Checked on the raw values: a rounded mean leaves a tiny non-zero
        // deviation for most constant windows.
        if is_constant(values) {
            return DetectionResult::clear();
        }
        let (Some(mean), Some(std_dev)) = (mean(values), population_std_dev(values)) else {
            return DetectionResult::clear();
        };
        if std_dev == 0.0 {
            return DetectionResult::clear();
        }

        let score = (value - mean) / std_dev;
        DetectionResult::new(score.abs() > self.threshold, score)
    }
}

// ============================================================================
// MAD Detector
// ============================================================================

/// Median-absolute-deviation window detector.
///
/// Scores a value by `|value - median| / MAD` using the unscaled MAD. The
/// score is non-negative and the test is one-sided: `score > threshold`.
#[derive(Debug, Clone)]
pub struct MadDetector {
    threshold: f64,
}

impl MadDetector {
    /// Create a new MAD detector with given threshold.
    pub fn new(threshold: f64) -> Result<Self> {
        check_threshold("mad_threshold", threshold)?;
        Ok(Self { threshold })
    }

    /// Create from configuration.
    pub fn from_config(config: MadConfig) -> Result<Self> {
        Self::new(config.threshold)
    }
}

impl Default for MadDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MAD_THRESHOLD,
        }
    }
}

impl WindowDetector for MadDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Mad
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn evaluate(&self, value: f64, window: &WindowSnapshot<'_>) -> DetectionResult {
        if !window.is_warm() {
            return DetectionResult::clear();
        }

        // More than half the window equal to the median gives MAD 0, so a
        // lone spike among constant values is never flagged here.
        let Some((median, mad)) = median_absolute_deviation(window.values()) else {
            return DetectionResult::clear();
        };
        if mad == 0.0 {
            return DetectionResult::clear();
        }

        let score = (value - median).abs() / mad;
        DetectionResult::new(score > self.threshold, score)
    }
}
