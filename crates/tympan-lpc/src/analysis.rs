//! Autocorrelation-method LPC analysis of a single segment.

use tympan_common_audio::window::WindowKind;

use crate::autocorrelation::autocorrelation;
use crate::levinson::{LevinsonError, LpcSolution, levinson_durbin};

/// Windowed autocorrelation analysis followed by the Levinson-Durbin
/// recursion.
#[derive(Debug, Clone, PartialEq)]
pub struct LpcAnalysis {
    /// Prediction order `p`.
    pub order: usize,
    /// Window applied to the segment before the autocorrelation.
    pub window: WindowKind,
    /// White-noise correction: `r[0]` is scaled by `1 + conditioning` before
    /// the recursion. Zero leaves the autocorrelation untouched.
    pub conditioning: f64,
}

impl LpcAnalysis {
    pub fn new(order: usize) -> Self {
        Self {
            order,
            window: WindowKind::Rectangular,
            conditioning: 0.0,
        }
    }

    /// Windowed autocorrelation of `segment` for lags `0..=order`.
    pub fn autocorrelation(&self, segment: &[f64]) -> Vec<f64> {
        let mut r = if self.window == WindowKind::Rectangular {
            autocorrelation(segment, self.order)
        } else {
            let windowed: Vec<f64> = segment
                .iter()
                .zip(self.window.coefficients(segment.len()))
                .map(|(x, w)| x * w)
                .collect();
            autocorrelation(&windowed, self.order)
        };
        r[0] *= 1.0 + self.conditioning;
        r
    }

    /// Predictor of order `order` for `segment`.
    pub fn analyze(&self, segment: &[f64]) -> Result<LpcSolution, LevinsonError> {
        let r = self.autocorrelation(segment);
        let solution = levinson_durbin(&r, self.order);
        if let Err(err) = &solution {
            tracing::debug!(len = segment.len(), order = self.order, %err, "LPC analysis failed");
        }
        solution
    }
}
