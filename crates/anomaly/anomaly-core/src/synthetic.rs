//! Synthetic observation stream for demos and soak runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use anomaly_spi::{AnomalyError, Result};

/// Endless noisy sine wave with occasional injected spikes.
///
/// Each step yields `amplitude * sin(frequency * t) + N(0, noise_sigma)`,
/// except that with probability `spike_probability` the value is replaced
/// by a draw from `spike_range`. Implements `Iterator<Item = f64>` and is
/// therefore a `StreamSource`; it never ends.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    rng: StdRng,
    t: u64,
    amplitude: f64,
    frequency: f64,
    noise_sigma: f64,
    spike_probability: f64,
    spike_low: f64,
    spike_high: f64,
}

impl SyntheticSource {
    /// Deterministic source for the given seed.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            t: 0,
            amplitude: 10.0,
            frequency: 0.2,
            noise_sigma: 1.0,
            spike_probability: 0.02,
            spike_low: 20.0,
            spike_high: 30.0,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Standard deviation of the gaussian noise; must be finite and non-negative.
    pub fn with_noise_sigma(mut self, sigma: f64) -> Result<Self> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(AnomalyError::invalid_parameter(
                "noise_sigma",
                "must be finite and non-negative",
            ));
        }
        self.noise_sigma = sigma;
        Ok(self)
    }

    /// Per-step spike probability in `[0, 1]`.
    pub fn with_spike_probability(mut self, probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(AnomalyError::invalid_parameter(
                "spike_probability",
                "must be within [0, 1]",
            ));
        }
        self.spike_probability = probability;
        Ok(self)
    }

    /// Half-open range spike values are drawn from.
    pub fn with_spike_range(mut self, low: f64, high: f64) -> Result<Self> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(AnomalyError::invalid_parameter(
                "spike_range",
                "low must be below high",
            ));
        }
        self.spike_low = low;
        self.spike_high = high;
        Ok(self)
    }

    /// Steps generated so far.
    pub fn position(&self) -> u64 {
        self.t
    }
}

impl Iterator for SyntheticSource {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let pattern = self.amplitude * (self.frequency * self.t as f64).sin();
        let noise: f64 = self.noise_sigma * self.rng.sample::<f64, _>(StandardNormal);
        let value = if self.rng.gen_bool(self.spike_probability) {
            self.rng.gen_range(self.spike_low..self.spike_high)
        } else {
            pattern + noise
        };
        self.t += 1;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let a: Vec<f64> = SyntheticSource::new(7).take(50).collect();
        let b: Vec<f64> = SyntheticSource::new(7).take(50).collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_noise_free_source_follows_sine() {
        let values: Vec<f64> = SyntheticSource::new(1)
            .with_noise_sigma(0.0)
            .unwrap()
            .with_spike_probability(0.0)
            .unwrap()
            .take(10)
            .collect();

        for (t, v) in values.iter().enumerate() {
            assert!((v - 10.0 * (0.2 * t as f64).sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_always_spiking_source_stays_in_range() {
        let mut source = SyntheticSource::new(3)
            .with_spike_probability(1.0)
            .unwrap()
            .with_spike_range(20.0, 30.0)
            .unwrap();

        for _ in 0..100 {
            let v = source.next().unwrap();
            assert!((20.0..30.0).contains(&v));
        }
        assert_eq!(source.position(), 100);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(SyntheticSource::new(0).with_noise_sigma(-1.0).is_err());
        assert!(SyntheticSource::new(0).with_spike_probability(1.5).is_err());
        assert!(SyntheticSource::new(0).with_spike_range(5.0, 5.0).is_err());
    }
}
