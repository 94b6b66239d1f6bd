//! Stream source and verdict sink contracts.

use crate::error::Result;
use crate::model::Verdict;

/// Producer of observations.
///
/// `None` means the source is exhausted. Every `Iterator<Item = f64>` is a
/// source, so fixture sequences can be passed directly.
pub trait StreamSource {
    /// Pull the next observation.
    fn next_value(&mut self) -> Option<f64>;
}

impl<I> StreamSource for I
where
    I: Iterator<Item = f64>,
{
    fn next_value(&mut self) -> Option<f64> {
        self.next()
    }
}

/// Consumer of verdicts, fed in step order.
pub trait VerdictSink {
    /// Accept one verdict.
    fn accept(&mut self, verdict: Verdict) -> Result<()>;
}

impl VerdictSink for Vec<Verdict> {
    fn accept(&mut self, verdict: Verdict) -> Result<()> {
        self.push(verdict);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DetectionResult;

    #[test]
    fn test_iterator_is_source() {
        let mut source = vec![1.0, 2.0].into_iter();
        assert_eq!(source.next_value(), Some(1.0));
        assert_eq!(source.next_value(), Some(2.0));
        assert_eq!(source.next_value(), None);
    }

    #[test]
    fn test_vec_is_sink() {
        let mut sink: Vec<Verdict> = Vec::new();
        let clear = DetectionResult::clear();
        sink.accept(Verdict::new(0, 1.0, clear, clear)).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].step, 0);
    }
}
