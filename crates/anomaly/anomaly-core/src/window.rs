//! Fixed-capacity trailing window.

use std::collections::VecDeque;

use anomaly_spi::{AnomalyError, Result, WindowSnapshot};

/// Most recent `capacity` observations in arrival order.
///
/// Pushing beyond capacity evicts the oldest observation. The buffer is kept
/// contiguous after every push so snapshots are plain slices.
#[derive(Debug, Clone)]
pub struct TrailingWindow {
    values: VecDeque<f64>,
    capacity: usize,
}

impl TrailingWindow {
    /// Create an empty window. A zero capacity is rejected.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(AnomalyError::invalid_parameter(
                "window_size",
                "must be positive",
            ));
        }
        Ok(Self {
            values: VecDeque::with_capacity(capacity + 1),
            capacity,
        })
    }

    /// Append an observation, returning the evicted one if the window was full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.values.len() == self.capacity {
            self.values.pop_front()
        } else {
            None
        };
        self.values.push_back(value);
        self.values.make_contiguous();
        evicted
    }

    /// Current contents, oldest first.
    pub fn as_slice(&self) -> &[f64] {
        // contiguous after every push
        self.values.as_slices().0
    }

    /// Read-only view for detectors.
    pub fn snapshot(&self) -> WindowSnapshot<'_> {
        WindowSnapshot::new(self.as_slice(), self.capacity)
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

    /// True once warm-up is complete.
    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            TrailingWindow::new(0),
            Err(AnomalyError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_fills_in_arrival_order() {
        let mut window = TrailingWindow::new(3).unwrap();
        assert!(window.is_empty());

        assert_eq!(window.push(1.0), None);
        assert_eq!(window.push(2.0), None);
        assert!(!window.is_full());
        assert_eq!(window.as_slice(), &[1.0, 2.0]);

        assert_eq!(window.push(3.0), None);
        assert!(window.is_full());
        assert_eq!(window.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_evicts_oldest() {
        let mut window = TrailingWindow::new(3).unwrap();
        for v in [1.0, 2.0, 3.0] {
            window.push(v);
        }
        assert_eq!(window.push(4.0), Some(1.0));
        assert_eq!(window.as_slice(), &[2.0, 3.0, 4.0]);
        assert_eq!(window.push(5.0), Some(2.0));
        assert_eq!(window.as_slice(), &[3.0, 4.0, 5.0]);
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_snapshot_carries_capacity() {
        let mut window = TrailingWindow::new(4).unwrap();
        window.push(1.0);
        let snapshot = window.snapshot();
        assert_eq!(snapshot.capacity(), 4);
        assert_eq!(snapshot.values(), &[1.0]);
        assert!(!snapshot.is_warm());
    }

    #[test]
    fn test_accepts_non_finite() {
        let mut window = TrailingWindow::new(2).unwrap();
        window.push(f64::INFINITY);
        window.push(f64::NAN);
        assert_eq!(window.len(), 2);
        assert!(window.as_slice()[1].is_nan());
    }

    #[test]
    fn test_clear() {
        let mut window = TrailingWindow::new(2).unwrap();
        window.push(1.0);
        window.push(2.0);
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.capacity(), 2);
    }

    proptest! {
        #[test]
        fn prop_keeps_last_capacity_values(
            capacity in 1usize..40,
            values in prop::collection::vec(-1e6f64..1e6, 0..120),
        ) {
            let mut window = TrailingWindow::new(capacity).unwrap();
            for &v in &values {
                window.push(v);
                prop_assert!(window.len() <= capacity);
            }
            let start = values.len().saturating_sub(capacity);
            prop_assert_eq!(window.as_slice(), &values[start..]);
        }
    }
}
