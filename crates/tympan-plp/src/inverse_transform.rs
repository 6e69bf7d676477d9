//! Auditory spectrum to autocorrelation.
//!
//! The band vector `x[0..=M]` is treated as one half of an even-symmetric
//! power spectrum of length `2M`. Its inverse DFT is real:
//!
//! ```text
//! r[k] = (x[0] + (-1)^k x[M] + 2 Σ_{j=1}^{M-1} x[j] cos(π j k / M)) / 2M
//! ```
//!
//! Only the first `num_lags` lags are kept.

use std::f64::consts::PI;

use crate::error::BandLayoutError;

/// Cosine table mapping `num_bands` band values to `num_lags`
/// autocorrelation lags.
#[derive(derive_more::Debug, Clone)]
pub struct InverseCosineTransform {
    num_bands: usize,
    num_lags: usize,
    /// Row-major `num_lags x num_bands`, normalisation folded in.
    #[debug(skip)]
    table: Vec<f64>,
}

impl InverseCosineTransform {
    pub fn new(num_bands: usize, num_lags: usize) -> Result<Self, BandLayoutError> {
        if num_bands < 2 {
            return Err(BandLayoutError::TooFewBands { num_bands, min: 2 });
        }
        if num_lags > num_bands {
            return Err(BandLayoutError::TooManyLags {
                num_lags,
                num_bands,
            });
        }
        let m = num_bands - 1;
        let norm = 1.0 / (2 * m) as f64;
        let mut table = Vec::with_capacity(num_lags * num_bands);
        for k in 0..num_lags {
            table.extend((0..num_bands).map(|j| {
                let scale = if j == 0 || j == m { 1.0 } else { 2.0 };
                scale * norm * (PI * (j * k) as f64 / m as f64).cos()
            }));
        }
        Ok(Self {
            num_bands,
            num_lags,
            table,
        })
    }

    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    pub fn num_lags(&self) -> usize {
        self.num_lags
    }

    pub fn apply(&self, bands: &[f64]) -> Vec<f64> {
        let mut lags = vec![0.0; self.num_lags];
        self.apply_into(bands, &mut lags);
        lags
    }

    pub fn apply_into(&self, bands: &[f64], lags: &mut [f64]) {
        debug_assert_eq!(bands.len(), self.num_bands);
        debug_assert_eq!(lags.len(), self.num_lags);
        for (lag, row) in lags.iter_mut().zip(self.table.chunks_exact(self.num_bands)) {
            *lag = row.iter().zip(bands).map(|(c, x)| c * x).sum();
        }
    }
}
