//! Anomaly Detection API
//!
//! Configuration types and builders for windowed anomaly detection.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{
    Alert, AlertSeverity, AnomalyError, DetectionResult, DetectorKind, Result, Verdict,
    VerdictLog, WindowSnapshot,
};

/// Default trailing window capacity.
pub const DEFAULT_WINDOW_SIZE: usize = 30;
/// Default two-sided z-score threshold.
pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;
/// Default one-sided MAD score threshold.
pub const DEFAULT_MAD_THRESHOLD: f64 = 3.0;

fn validate_threshold(name: &str, threshold: f64) -> Result<()> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(AnomalyError::invalid_parameter(
            name,
            format!("must be a positive finite number, got {}", threshold),
        ));
    }
    Ok(())
}

// ============================================================================
// Detector Configuration
// ============================================================================

/// Z-Score detector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZScoreConfig {
    /// |z| above this flags an anomaly (default: 2.0).
    pub threshold: f64,
}

impl Default for ZScoreConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl ZScoreConfig {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn validate(&self) -> Result<()> {
        validate_threshold("z_threshold", self.threshold)
    }
}

/// MAD detector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MadConfig {
    /// MAD score above this flags an anomaly (default: 3.0).
    pub threshold: f64,
}

impl Default for MadConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MAD_THRESHOLD,
        }
    }
}

impl MadConfig {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn validate(&self) -> Result<()> {
        validate_threshold("mad_threshold", self.threshold)
    }
}

// ============================================================================
// Evaluator Configuration
// ============================================================================

/// Stream evaluator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Trailing window capacity; also the warm-up length.
    pub window_size: usize,
    pub zscore: ZScoreConfig,
    pub mad: MadConfig,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            zscore: ZScoreConfig::default(),
            mad: MadConfig::default(),
        }
    }
}

impl EvaluatorConfig {
    pub fn new(window_size: usize, z_threshold: f64, mad_threshold: f64) -> Self {
        Self {
            window_size,
            zscore: ZScoreConfig::new(z_threshold),
            mad: MadConfig::new(mad_threshold),
        }
    }

    /// Start a builder from the defaults.
    pub fn builder() -> EvaluatorConfigBuilder {
        EvaluatorConfigBuilder::new()
    }

    /// Reject non-positive window sizes and thresholds.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(AnomalyError::invalid_parameter(
                "window_size",
                "must be positive",
            ));
        }
        self.zscore.validate()?;
        self.mad.validate()
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnomalyError::invalid_parameter("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder for EvaluatorConfig.
#[derive(Debug, Default)]
pub struct EvaluatorConfigBuilder {
    window_size: Option<usize>,
    z_threshold: Option<f64>,
    mad_threshold: Option<f64>,
}

impl EvaluatorConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window size.
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = Some(window_size);
        self
    }

    /// Set the z-score threshold.
    pub fn z_threshold(mut self, threshold: f64) -> Self {
        self.z_threshold = Some(threshold);
        self
    }

    /// Set the MAD threshold.
    pub fn mad_threshold(mut self, threshold: f64) -> Self {
        self.mad_threshold = Some(threshold);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<EvaluatorConfig> {
        let defaults = EvaluatorConfig::default();
        let config = EvaluatorConfig {
            window_size: self.window_size.unwrap_or(defaults.window_size),
            zscore: self
                .z_threshold
                .map(ZScoreConfig::new)
                .unwrap_or(defaults.zscore),
            mad: self
                .mad_threshold
                .map(MadConfig::new)
                .unwrap_or(defaults.mad),
        };
        config.validate()?;
        Ok(config)
    }
}
