//! Stream evaluator: drives observations through the window and both detectors.

use anomaly_api::EvaluatorConfig;
use anomaly_spi::{AnomalyError, Result, StreamSource, Verdict, VerdictSink, WindowDetector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::detectors::{MadDetector, ZScoreDetector};
use crate::window::TrailingWindow;

/// Counters for a completed [`StreamEvaluator::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Verdicts produced.
    pub steps: u64,
    /// Verdicts flagged by either detector.
    pub anomalies: u64,
    pub zscore_anomalies: u64,
    pub mad_anomalies: u64,
    /// Non-finite values dropped before reaching the window.
    pub rejected: u64,
}

impl RunSummary {
    fn record(&mut self, verdict: &Verdict) {
        self.steps += 1;
        self.anomalies += u64::from(verdict.is_anomaly);
        self.zscore_anomalies += u64::from(verdict.is_anomaly_z());
        self.mad_anomalies += u64::from(verdict.is_anomaly_mad());
    }
}

/// Single-writer owner of the trailing window.
///
/// Each observation is appended to the window *before* it is scored, so the
/// statistics it is judged against include the observation itself. This
/// damps sensitivity (with `n` samples a lone spike can reach at most
/// `|z| = sqrt(n - 1)`) and is intentional; scoring against the window
/// without the new value would change what gets flagged.
///
/// Non-finite observations are rejected with [`AnomalyError::NonFiniteValue`]
/// and leave the window and step counter untouched.
#[derive(Debug, Clone)]
pub struct StreamEvaluator<Z = ZScoreDetector, M = MadDetector>
where
    Z: WindowDetector,
    M: WindowDetector,
{
    window: TrailingWindow,
    zscore: Z,
    mad: M,
    next_step: u64,
}

impl StreamEvaluator {
    /// Create an evaluator from a validated configuration.
    pub fn new(config: EvaluatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_detectors(
            TrailingWindow::new(config.window_size)?,
            ZScoreDetector::from_config(config.zscore)?,
            MadDetector::from_config(config.mad)?,
        ))
    }
}

impl<Z, M> StreamEvaluator<Z, M>
where
    Z: WindowDetector,
    M: WindowDetector,
{
    /// Assemble an evaluator from an empty window and two detectors.
    pub fn with_detectors(window: TrailingWindow, zscore: Z, mad: M) -> Self {
        Self {
            window,
            zscore,
            mad,
            next_step: 0,
        }
    }

    /// Evaluate one observation supplied directly.
    pub fn evaluate(&mut self, value: f64) -> Result<Verdict> {
        if !value.is_finite() {
            warn!(step = self.next_step, value, "rejecting non-finite value");
            return Err(AnomalyError::NonFiniteValue {
                step: self.next_step,
                value,
            });
        }

        self.window.push(value);
        let snapshot = self.window.snapshot();
        let zscore = self.zscore.evaluate(value, &snapshot);
        let mad = self.mad.evaluate(value, &snapshot);

        let verdict = Verdict::new(self.next_step, value, zscore, mad);
        self.next_step += 1;

        if verdict.is_anomaly {
            debug!(
                step = verdict.step,
                value,
                zscore = zscore.score,
                mad_score = mad.score,
                "anomaly detected"
            );
        } else {
            trace!(step = verdict.step, value, "observation within bounds");
        }
        Ok(verdict)
    }

    /// Pull the next value from `source` and evaluate it.
    ///
    /// Returns [`AnomalyError::StreamExhausted`] when the source is done.
    pub fn process_next<S>(&mut self, source: &mut S) -> Result<Verdict>
    where
        S: StreamSource + ?Sized,
    {
        match source.next_value() {
            Some(value) => self.evaluate(value),
            None => Err(AnomalyError::StreamExhausted {
                steps: self.next_step,
            }),
        }
    }

    /// Feed verdicts from `source` into `sink` until the source is exhausted
    /// or `limit` verdicts have been produced.
    ///
    /// Non-finite values are skipped and counted; sink errors abort the run.
    pub fn run<S, K>(
        &mut self,
        source: &mut S,
        sink: &mut K,
        limit: Option<usize>,
    ) -> Result<RunSummary>
    where
        S: StreamSource + ?Sized,
        K: VerdictSink + ?Sized,
    {
        info!(
            window_size = self.window.capacity(),
            z_threshold = self.zscore.threshold(),
            mad_threshold = self.mad.threshold(),
            limit = ?limit,
            "starting stream evaluation"
        );

        let mut summary = RunSummary::default();
        while limit.map_or(true, |max| summary.steps < max as u64) {
            match self.process_next(source) {
                Ok(verdict) => {
                    summary.record(&verdict);
                    sink.accept(verdict)?;
                }
                Err(AnomalyError::NonFiniteValue { .. }) => summary.rejected += 1,
                Err(e) if e.is_end_of_stream() => break,
                Err(e) => return Err(e),
            }
        }

        info!(
            steps = summary.steps,
            anomalies = summary.anomalies,
            zscore_anomalies = summary.zscore_anomalies,
            mad_anomalies = summary.mad_anomalies,
            rejected = summary.rejected,
            "stream evaluation finished"
        );
        Ok(summary)
    }

    /// The trailing window.
    pub fn window(&self) -> &TrailingWindow {
        &self.window
    }

    /// Number of verdicts produced so far; also the next step index.
    pub fn steps_processed(&self) -> u64 {
        self.next_step
    }

    pub fn zscore_detector(&self) -> &Z {
        &self.zscore
    }

    pub fn mad_detector(&self) -> &M {
        &self.mad
    }

    /// Empty the window and restart step numbering.
    pub fn reset(&mut self) {
        self.window.clear();
        self.next_step = 0;
    }
}
