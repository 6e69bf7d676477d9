//! Tapering windows applied to analysis frames.

use std::f64::consts::TAU;

/// Window function applied to each frame before spectral analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowKind {
    /// Symmetric Hamming window, `0.54 - 0.46 cos(2πn / (L - 1))`.
    #[default]
    Hamming,
    /// Symmetric Hann window, `0.5 - 0.5 cos(2πn / (L - 1))`.
    Hann,
    /// No tapering.
    Rectangular,
}

impl WindowKind {
    /// Computes the window coefficients for a frame of `len` samples.
    ///
    /// A single-sample window is `[1.0]` for every kind.
    pub fn coefficients(self, len: usize) -> Vec<f64> {
        match len {
            0 => return Vec::new(),
            1 => return vec![1.0],
            _ => {}
        }
        let denom = (len - 1) as f64;
        (0..len)
            .map(|n| {
                let phase = TAU * n as f64 / denom;
                match self {
                    Self::Hamming => 0.54 - 0.46 * phase.cos(),
                    Self::Hann => 0.5 - 0.5 * phase.cos(),
                    Self::Rectangular => 1.0,
                }
            })
            .collect()
    }
}
