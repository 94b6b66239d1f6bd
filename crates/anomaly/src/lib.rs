//! # anomaly
//!
//! Streaming anomaly detection for rustful-ts.
//! Scores each observation against a trailing window with a z-score and a
//! MAD detector and combines both into a per-step verdict.
//!
//! ```
//! use anomaly::{EvaluatorConfig, StreamEvaluator, VerdictLog};
//!
//! let mut evaluator = StreamEvaluator::new(EvaluatorConfig::default())?;
//! let mut source = (0..100).map(|i| (i % 7) as f64);
//! let mut log = VerdictLog::new();
//! let summary = evaluator.run(&mut source, &mut log, None)?;
//! assert_eq!(summary.steps, 100);
//! # Ok::<(), anomaly::AnomalyError>(())
//! ```

pub use anomaly_facade::*;
