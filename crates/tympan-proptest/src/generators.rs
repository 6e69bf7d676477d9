//! Deterministic test signals and proptest strategies.

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use proptest::prelude::*;

/// Samples discarded before an [`ArProcess`] output starts, so the filter
/// state has forgotten its zero initial conditions.
const AR_WARM_UP: usize = 1024;

/// `len` samples of `amplitude * sin(2π f n / rate)`.
pub fn sine(freq_hz: f64, sample_rate_hz: f64, len: usize, amplitude: f64) -> Vec<f64> {
    let step = 2.0 * PI * freq_hz / sample_rate_hz;
    (0..len)
        .map(|n| amplitude * (step * n as f64).sin())
        .collect()
}

/// 64-bit linear congruential generator.
#[derive(Debug, Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed ^ 0x9e37_79b9_7f4a_7c15)
    }

    /// Uniform sample in `[-1, 1)`.
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        // Top 53 bits give a uniform mantissa.
        let unit = (self.0 >> 11) as f64 / (1u64 << 53) as f64;
        2.0 * unit - 1.0
    }
}

/// `len` samples of uniform white noise in `[-1, 1)`.
pub fn white_noise(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    (0..len).map(|_| rng.next_f64()).collect()
}

/// Autoregressive process `x[n] = Σ a[k] x[n-k] + g w[n]` driven by uniform
/// white noise `w`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArProcess {
    pub coefficients: Vec<f64>,
    pub innovation_scale: f64,
}

impl ArProcess {
    pub fn new(coefficients: Vec<f64>, innovation_scale: f64) -> Self {
        Self {
            coefficients,
            innovation_scale,
        }
    }

    /// `len` samples of the process after a warm-up period.
    pub fn generate(&self, len: usize, seed: u64) -> Vec<f64> {
        let p = self.coefficients.len();
        let noise = white_noise(len + AR_WARM_UP, seed);
        let mut x = vec![0.0; len + AR_WARM_UP];
        for n in 0..x.len() {
            let mut acc = self.innovation_scale * noise[n];
            for k in 1..=p.min(n) {
                acc += self.coefficients[k - 1] * x[n - k];
            }
            x[n] = acc;
        }
        x.split_off(AR_WARM_UP)
    }
}

/// All-pole model whose autocorrelation is known exactly.
///
/// Built from reflection coefficients with the step-up recursion, the inverse
/// of Levinson-Durbin: any `|k_i| < 1` yields a positive definite sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct KnownAllPole {
    /// `r[0..=p]`.
    pub autocorrelation: Vec<f64>,
    /// Predictor `a[1..=p]` with `x[n] ≈ Σ a[k] x[n-k]`.
    pub coefficients: Vec<f64>,
    /// Prediction error `r0 Π (1 - k_i²)`.
    pub residual_energy: f64,
}

impl KnownAllPole {
    pub fn from_reflection(reflection: &[f64], r0: f64) -> Self {
        let p = reflection.len();
        let mut r = vec![0.0; p + 1];
        r[0] = r0;
        let mut a = vec![0.0; p + 1];
        let mut prev = vec![0.0; p + 1];
        let mut error = r0;
        for (idx, &k) in reflection.iter().enumerate() {
            let i = idx + 1;
            r[i] = k * error + (1..i).map(|j| a[j] * r[i - j]).sum::<f64>();
            prev[..i].copy_from_slice(&a[..i]);
            for j in 1..i {
                a[j] = prev[j] - k * prev[i - j];
            }
            a[i] = k;
            error *= 1.0 - k * k;
        }
        Self {
            autocorrelation: r,
            coefficients: a[1..].to_vec(),
            residual_energy: error,
        }
    }
}

/// Reflection coefficient vectors with a length in `len` and every entry in
/// `[-max_magnitude, max_magnitude]`.
pub fn reflection_coefficients(
    len: RangeInclusive<usize>,
    max_magnitude: f64,
) -> impl Strategy<Value = Vec<f64>> {
    len.prop_flat_map(move |n| {
        prop::collection::vec(-max_magnitude..=max_magnitude, n)
    })
}

/// Finite audio-range buffers of `len` samples.
pub fn audio_buffer(len: RangeInclusive<usize>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0f64..1.0, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn sine_hits_expected_samples() {
        let x = sine(1000.0, 4000.0, 4, 2.0);
        assert!(x[0].abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
        assert!(x[2].abs() < 1e-12);
        assert!((x[3] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn white_noise_is_deterministic_and_bounded() {
        let a = white_noise(1000, 3);
        assert_eq!(a, white_noise(1000, 3));
        assert_ne!(a, white_noise(1000, 4));
        assert!(a.iter().all(|v| (-1.0..1.0).contains(v)));
        let mean = a.iter().sum::<f64>() / a.len() as f64;
        assert!(mean.abs() < 0.1, "mean {mean}");
    }

    #[test]
    fn ar_process_without_feedback_is_scaled_noise() {
        let x = ArProcess::new(vec![], 0.5).generate(16, 9);
        let w = white_noise(16 + AR_WARM_UP, 9);
        for (got, want) in x.iter().zip(&w[AR_WARM_UP..]) {
            assert!((got - 0.5 * want).abs() < 1e-15);
        }
    }

    #[test]
    fn first_order_model_matches_closed_form() {
        let model = KnownAllPole::from_reflection(&[0.5], 4.0);
        assert_eq!(model.autocorrelation, vec![4.0, 2.0]);
        assert_eq!(model.coefficients, vec![0.5]);
        assert_eq!(model.residual_energy, 3.0);
    }

    #[proptest]
    fn reflection_strategy_respects_bounds(
        #[strategy(reflection_coefficients(2..=5, 0.3))] ks: Vec<f64>,
    ) {
        prop_assert!((2..=5).contains(&ks.len()));
        prop_assert!(ks.iter().all(|k| k.abs() <= 0.3));
    }
}
