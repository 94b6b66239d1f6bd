//! Anomaly Detection Core
//!
//! Implementations for windowed anomaly detection: the trailing window,
//! the z-score and MAD detectors, the stream evaluator and alerting.

mod alerting;
mod detectors;
mod evaluator;
mod stats;
mod synthetic;
mod window;

pub use alerting::*;
pub use detectors::*;
pub use evaluator::*;
pub use stats::{mean, median, median_absolute_deviation, population_std_dev};
pub use synthetic::*;
pub use window::*;
