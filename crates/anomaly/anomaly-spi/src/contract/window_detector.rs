//! Window detector trait definition.

use crate::model::{DetectionResult, DetectorKind, WindowSnapshot};

/// Scores a candidate value against a trailing window.
///
/// Implementations are pure: the same value and window always produce the
/// same result, and the window is never mutated. Warm-up and degenerate
/// dispersion are reported as [`DetectionResult::clear`], never as errors.
pub trait WindowDetector: Send + Sync {
    /// Which detector this is.
    fn kind(&self) -> DetectorKind;

    /// Threshold the score is compared against.
    fn threshold(&self) -> f64;

    /// Score `value` against `window`.
    fn evaluate(&self, value: f64, window: &WindowSnapshot<'_>) -> DetectionResult;
}
