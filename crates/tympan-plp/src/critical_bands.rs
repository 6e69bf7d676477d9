//! Critical-band (Bark) filterbank.
//!
//! Band `i` is centered at `i * step` Bark, `step = nyquist_bark /
//! (num_bands - 1)`. For a spectral bin at Bark `b` its weight is
//!
//! ```text
//! w = 10^min(0, b - c + 0.5, -2.5 (b - c - 0.5))
//! ```
//!
//! which in dB is a trapezoid: a flat top one Bark wide, rising at 10 dB/Bark
//! below it and falling at 25 dB/Bark above it.

use crate::bark::{MIN_NUM_BANDS, band_centers_hz, band_step_bark, hz_to_bark};
use crate::error::BandLayoutError;

/// Slope of the upper skirt relative to the lower one.
const UPPER_SKIRT_SLOPE: f64 = 2.5;

/// Precomputed Bark filterbank for one sample rate and transform length.
#[derive(derive_more::Debug, Clone)]
pub struct CriticalBandFilterBank {
    sample_rate_hz: u32,
    num_bands: usize,
    num_bins: usize,
    /// Row-major `num_bands x num_bins`.
    #[debug(skip)]
    weights: Vec<f64>,
}

impl CriticalBandFilterBank {
    /// Builds the filterbank for power spectra of `transform_length / 2 + 1`
    /// bins at `sample_rate_hz`.
    pub fn new(
        sample_rate_hz: u32,
        transform_length: usize,
        num_bands: usize,
    ) -> Result<Self, BandLayoutError> {
        if sample_rate_hz == 0 {
            return Err(BandLayoutError::ZeroSampleRate);
        }
        if transform_length == 0 {
            return Err(BandLayoutError::ZeroTransformLength);
        }
        if num_bands < MIN_NUM_BANDS {
            return Err(BandLayoutError::TooFewBands {
                num_bands,
                min: MIN_NUM_BANDS,
            });
        }

        let num_bins = transform_length / 2 + 1;
        let bin_hz = f64::from(sample_rate_hz) / transform_length as f64;
        let bin_barks: Vec<f64> = (0..num_bins)
            .map(|k| hz_to_bark(k as f64 * bin_hz))
            .collect();
        let step = band_step_bark(sample_rate_hz, num_bands);

        let mut weights = Vec::with_capacity(num_bands * num_bins);
        for band in 0..num_bands {
            let center = step * band as f64;
            weights.extend(bin_barks.iter().map(|&b| {
                let lower = b - center + 0.5;
                let upper = -UPPER_SKIRT_SLOPE * (b - center - 0.5);
                10f64.powf(lower.min(upper).min(0.0))
            }));
        }

        tracing::debug!(
            sample_rate_hz,
            transform_length,
            num_bands,
            step_bark = step,
            "critical band filterbank"
        );
        Ok(Self {
            sample_rate_hz,
            num_bands,
            num_bins,
            weights,
        })
    }

    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// Expected power spectrum length.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Band center frequencies in Hz.
    pub fn center_frequencies_hz(&self) -> Vec<f64> {
        band_centers_hz(self.sample_rate_hz, self.num_bands)
    }

    /// Weights of `band` over every bin.
    pub fn band_weights(&self, band: usize) -> &[f64] {
        &self.weights[band * self.num_bins..(band + 1) * self.num_bins]
    }

    /// Band energies of a power spectrum.
    pub fn apply(&self, power: &[f64]) -> Vec<f64> {
        let mut bands = vec![0.0; self.num_bands];
        self.apply_into(power, &mut bands);
        bands
    }

    /// Writes the band energies of `power` into `bands`.
    ///
    /// `power` must have [`num_bins`](Self::num_bins) entries and `bands`
    /// [`num_bands`](Self::num_bands).
    pub fn apply_into(&self, power: &[f64], bands: &mut [f64]) {
        debug_assert_eq!(power.len(), self.num_bins);
        debug_assert_eq!(bands.len(), self.num_bands);
        for (band, row) in bands.iter_mut().zip(self.weights.chunks_exact(self.num_bins)) {
            *band = row.iter().zip(power).map(|(w, p)| w * p).sum();
        }
    }
}
