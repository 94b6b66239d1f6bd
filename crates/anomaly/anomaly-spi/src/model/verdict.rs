//! Combined per-step verdicts.

use serde::{Deserialize, Serialize};

use crate::contract::VerdictSink;
use crate::error::Result;
use crate::model::{DetectionResult, DetectorKind};

/// Combined anomaly determination for one observation.
///
/// Both sub-results are kept so consumers can apply their own combination
/// rule; `is_anomaly` is the logical OR of the two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Zero-based position of the observation in the stream.
    pub step: u64,
    /// The observed value.
    pub value: f64,
    /// Z-score detector outcome.
    pub zscore: DetectionResult,
    /// MAD detector outcome.
    pub mad: DetectionResult,
    /// True when either detector flagged the value.
    pub is_anomaly: bool,
}

impl Verdict {
    /// Combine two detector outcomes into a verdict.
    pub fn new(step: u64, value: f64, zscore: DetectionResult, mad: DetectionResult) -> Self {
        Self {
            step,
            value,
            zscore,
            mad,
            is_anomaly: zscore.is_anomaly || mad.is_anomaly,
        }
    }

    pub fn is_anomaly_z(&self) -> bool {
        self.zscore.is_anomaly
    }

    pub fn is_anomaly_mad(&self) -> bool {
        self.mad.is_anomaly
    }

    /// Detectors that flagged this observation.
    pub fn fired_by(&self) -> Vec<DetectorKind> {
        let mut fired = Vec::with_capacity(2);
        if self.zscore.is_anomaly {
            fired.push(DetectorKind::ZScore);
        }
        if self.mad.is_anomaly {
            fired.push(DetectorKind::Mad);
        }
        fired
    }
}

/// Collecting sink that retains every verdict it receives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerdictLog {
    verdicts: Vec<Verdict>,
}

impl VerdictLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All verdicts received so far, in step order.
    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// Steps of the verdicts flagged as anomalous.
    pub fn anomaly_indices(&self) -> Vec<u64> {
        self.verdicts
            .iter()
            .filter_map(|v| if v.is_anomaly { Some(v.step) } else { None })
            .collect()
    }

    /// Count of anomalous verdicts.
    pub fn anomaly_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.is_anomaly).count()
    }

    pub fn into_inner(self) -> Vec<Verdict> {
        self.verdicts
    }
}

impl VerdictSink for VerdictLog {
    fn accept(&mut self, verdict: Verdict) -> Result<()> {
        self.verdicts.push(verdict);
        Ok(())
    }
}
