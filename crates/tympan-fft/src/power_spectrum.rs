//! One-sided power spectrum of a real frame.

use std::fmt;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Error returned when creating a [`PowerSpectrum`] analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerSpectrumError {
    /// The transform length must be positive.
    ZeroLength,
    /// The transform is shorter than the frames it has to hold.
    TransformTooShort {
        transform_length: usize,
        frame_length: usize,
    },
}

impl fmt::Display for PowerSpectrumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ZeroLength => f.write_str("transform length must be positive"),
            Self::TransformTooShort {
                transform_length,
                frame_length,
            } => write!(
                f,
                "transform length {transform_length} is shorter than frame length {frame_length}",
            ),
        }
    }
}

impl std::error::Error for PowerSpectrumError {}

/// Smallest power of two that holds a frame of `frame_length` samples, or
/// `None` if it does not fit in `usize`.
pub fn default_transform_length(frame_length: usize) -> Option<usize> {
    frame_length.max(1).checked_next_power_of_two()
}

/// Computes `|X[k]|^2` for `k = 0..=N/2` of zero-padded real frames.
#[derive(derive_more::Debug, Clone)]
pub struct PowerSpectrum {
    transform_length: usize,
    #[debug(skip)]
    fft: Arc<dyn Fft<f64>>,
}

impl PowerSpectrum {
    /// Plans a forward transform of `transform_length` points for frames of
    /// up to `frame_length` samples.
    pub fn new(transform_length: usize, frame_length: usize) -> Result<Self, PowerSpectrumError> {
        if transform_length == 0 {
            return Err(PowerSpectrumError::ZeroLength);
        }
        if transform_length < frame_length {
            return Err(PowerSpectrumError::TransformTooShort {
                transform_length,
                frame_length,
            });
        }
        let fft = FftPlanner::new().plan_fft_forward(transform_length);
        Ok(Self {
            transform_length,
            fft,
        })
    }

    pub fn transform_length(&self) -> usize {
        self.transform_length
    }

    /// Number of non-negative frequency bins, `transform_length / 2 + 1`.
    pub fn num_bins(&self) -> usize {
        self.transform_length / 2 + 1
    }

    /// Power spectrum of `frame`, which must not be longer than the transform.
    pub fn compute(&self, frame: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.num_bins()];
        self.compute_into(frame, &mut out);
        out
    }

    /// Writes the power spectrum of `frame` into `out` (`num_bins()` values).
    pub fn compute_into(&self, frame: &[f64], out: &mut [f64]) {
        debug_assert!(frame.len() <= self.transform_length);
        debug_assert_eq!(out.len(), self.num_bins());

        let mut buffer = vec![Complex::new(0.0, 0.0); self.transform_length];
        for (b, &s) in buffer.iter_mut().zip(frame) {
            b.re = s;
        }
        let mut scratch = vec![Complex::new(0.0, 0.0); self.fft.get_inplace_scratch_len()];
        self.fft.process_with_scratch(&mut buffer, &mut scratch);

        for (o, x) in out.iter_mut().zip(&buffer) {
            *o = x.norm_sqr();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::TAU;
    use test_strategy::proptest;

    #[test]
    fn rejects_invalid_lengths() {
        assert_eq!(
            PowerSpectrum::new(0, 0).unwrap_err(),
            PowerSpectrumError::ZeroLength
        );
        assert_eq!(
            PowerSpectrum::new(256, 400).unwrap_err(),
            PowerSpectrumError::TransformTooShort {
                transform_length: 256,
                frame_length: 400,
            }
        );
    }

    #[test]
    fn default_length_is_next_power_of_two() {
        assert_eq!(default_transform_length(400), Some(512));
        assert_eq!(default_transform_length(200), Some(256));
        assert_eq!(default_transform_length(512), Some(512));
        assert_eq!(default_transform_length(0), Some(1));
        assert_eq!(default_transform_length(usize::MAX), None);
        assert_eq!(default_transform_length(usize::MAX / 2 + 2), None);
    }

    #[test]
    fn output_has_half_plus_one_bins() {
        let ps = PowerSpectrum::new(512, 400).unwrap();
        assert_eq!(ps.compute(&[0.0; 400]).len(), 257);
    }

    #[test]
    fn dc_frame_concentrates_in_bin_zero() {
        let ps = PowerSpectrum::new(64, 64).unwrap();
        let spec = ps.compute(&[1.0; 64]);
        assert!((spec[0] - 64.0 * 64.0).abs() < 1e-9);
        for &p in &spec[1..] {
            assert!(p < 1e-18);
        }
    }

    #[test]
    fn bin_centered_sine_peaks_at_its_bin() {
        let n = 256;
        let bin = 20;
        let frame: Vec<f64> = (0..n)
            .map(|i| (TAU * bin as f64 * i as f64 / n as f64).sin())
            .collect();
        let spec = PowerSpectrum::new(n, n).unwrap().compute(&frame);
        let peak = spec
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| k)
            .unwrap();
        assert_eq!(peak, bin);
        // Amplitude 1 sine: |X[k]| = N/2.
        assert!((spec[bin] - (n as f64 / 2.0).powi(2)).abs() < 1e-6);
    }

    #[proptest]
    fn parseval_holds_for_zero_padded_frames(
        #[strategy(prop::collection::vec(-1.0f64..1.0, 1..200))] frame: Vec<f64>,
    ) {
        let n = default_transform_length(frame.len()).unwrap();
        let spec = PowerSpectrum::new(n, frame.len()).unwrap().compute(&frame);
        // One-sided sum: DC and Nyquist once, everything else twice.
        let mut total = spec[0];
        for (k, &p) in spec.iter().enumerate().skip(1) {
            total += if 2 * k == n { p } else { 2.0 * p };
        }
        let energy: f64 = frame.iter().map(|x| x * x).sum();
        prop_assert!((total / n as f64 - energy).abs() < 1e-9 * (1.0 + energy));
        prop_assert!(spec.iter().all(|&p| p >= 0.0));
    }
}
