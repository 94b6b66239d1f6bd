//! Window statistics.
//!
//! All functions return `None` for an empty slice. Mean and standard
//! deviation are computed on values scaled down by a power of two, so any
//! finite input up to `f64::MAX / 2` in magnitude stays representable.

/// Power of two at least as large as the largest magnitude, or 1.
fn magnitude_scale(values: &[f64]) -> f64 {
    let max_abs = values.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
    if !max_abs.is_finite() || max_abs <= 1.0 {
        return 1.0;
    }
    let exponent = (max_abs.log2().ceil() as i32).min(f64::MAX_EXP - 1);
    2f64.powi(exponent)
}

/// True when every value equals the first; such a window has no dispersion.
pub fn is_constant(values: &[f64]) -> bool {
    values.split_first().map_or(true, |(first, rest)| {
        rest.iter().all(|x| x == first)
    })
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let scale = magnitude_scale(values);
    let n = values.len() as f64;
    Some(values.iter().map(|x| x / scale).sum::<f64>() / n * scale)
}

/// Population standard deviation (divisor `n`, not `n - 1`).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let scale = magnitude_scale(values);
    let n = values.len() as f64;
    let scaled_mean = values.iter().map(|x| x / scale).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|x| (x / scale - scaled_mean).powi(2))
        .sum::<f64>()
        / n;
    Some(variance.sqrt() * scale)
}

/// Median; the mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Median and unscaled median absolute deviation from that median.
pub fn median_absolute_deviation(values: &[f64]) -> Option<(f64, f64)> {
    let center = median(values)?;
    let deviations: Vec<f64> = values.iter().map(|&x| (x - center).abs()).collect();
    let mad = median(&deviations)?;
    Some((center, mad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs() {
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std_dev(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(median_absolute_deviation(&[]), None);
    }

    #[test]
    fn test_mean_and_population_std_dev() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&data), Some(5.0));
        // Population formula: sample formula would give ~2.138.
        assert_eq!(population_std_dev(&data), Some(2.0));
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[7.0]), Some(7.0));
    }

    #[test]
    fn test_median_does_not_reorder_input() {
        let data = [5.0, 1.0, 3.0];
        let _ = median(&data);
        assert_eq!(data, [5.0, 1.0, 3.0]);
    }

    #[test]
    fn test_mad() {
        // median 3, deviations [2, 0, 1, 1, 3] -> MAD 1
        let data = [1.0, 3.0, 2.0, 4.0, 6.0];
        assert_eq!(median_absolute_deviation(&data), Some((3.0, 1.0)));
    }

    #[test]
    fn test_is_constant() {
        assert!(is_constant(&[]));
        assert!(is_constant(&[7.7; 30]));
        assert!(!is_constant(&[7.7, 7.7, 7.700000000000001]));
    }

    #[test]
    fn test_constant_window_mean_may_round() {
        // sum / n does not return 0.1 exactly, so the dispersion check
        // cannot rely on the standard deviation alone.
        let data = [0.1; 30];
        assert!(is_constant(&data));
        assert!(population_std_dev(&data).unwrap() < 1e-12);
    }

    #[test]
    fn test_huge_magnitudes_do_not_overflow() {
        let data = [-1e300, 1e300, -1e300, 1e300];
        let mean = mean(&data).unwrap();
        let std_dev = population_std_dev(&data).unwrap();
        assert_eq!(mean, 0.0);
        assert!(std_dev.is_finite());
        assert!((std_dev / 1e300 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mad_single_outlier_is_zero() {
        let mut data = vec![0.0; 29];
        data.push(50.0);
        assert_eq!(median_absolute_deviation(&data), Some((0.0, 0.0)));
    }
}
