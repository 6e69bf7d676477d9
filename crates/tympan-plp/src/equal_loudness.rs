//! Equal-loudness pre-emphasis and intensity-to-loudness compression.

use crate::bark::MIN_NUM_BANDS;

/// Energies at or below this value, and NaN, are replaced by it before
/// compression so the later log stages stay finite.
pub const BAND_ENERGY_FLOOR: f64 = 1e-20;

/// Cubic-root power law of intensity to loudness.
pub const COMPRESSION_EXPONENT: f64 = 1.0 / 3.0;

/// Approximation of the 40 dB equal-loudness curve at `freq_hz`:
///
/// ```text
/// E(f) = (f² / (f² + 1.6e5))² · (f² + 1.44e6) / (f² + 9.61e6)
/// ```
pub fn equal_loudness(freq_hz: f64) -> f64 {
    let f2 = freq_hz * freq_hz;
    let ratio = f2 / (f2 + 1.6e5);
    ratio * ratio * (f2 + 1.44e6) / (f2 + 9.61e6)
}

/// Equal-loudness weights for a fixed set of band centers, applied together
/// with the power-law compression.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualLoudness {
    weights: Vec<f64>,
}

impl EqualLoudness {
    pub fn new(center_frequencies_hz: &[f64]) -> Self {
        Self {
            weights: center_frequencies_hz
                .iter()
                .map(|&f| equal_loudness(f))
                .collect(),
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Turns band energies into an auditory spectrum, in place: weight,
    /// floor, raise to [`COMPRESSION_EXPONENT`], then copy the second and the
    /// second-to-last bands over the first and last ones.
    ///
    /// The edge copy is skipped for fewer than three bands.
    pub fn compress(&self, bands: &mut [f64]) {
        debug_assert_eq!(bands.len(), self.weights.len());
        for (band, w) in bands.iter_mut().zip(&self.weights) {
            let weighted = *band * w;
            // An overflowed band stays the loudest one.
            let clamped = if weighted > BAND_ENERGY_FLOOR {
                weighted.min(f64::MAX)
            } else {
                BAND_ENERGY_FLOOR
            };
            *band = clamped.powf(COMPRESSION_EXPONENT);
        }
        // The 0 Hz band has zero weight and the Nyquist band is cut in half.
        let n = bands.len();
        if n >= MIN_NUM_BANDS {
            bands[0] = bands[1];
            bands[n - 1] = bands[n - 2];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_strategy::proptest;

    #[test]
    fn curve_reference_values() {
        assert_eq!(equal_loudness(0.0), 0.0);
        assert!((equal_loudness(400.0) - 0.040_941_658).abs() < 1e-8);
        assert!((equal_loudness(1000.0) - 0.170_906_454).abs() < 1e-8);
        assert!((equal_loudness(4000.0) - 0.667_565_916).abs() < 1e-8);
        assert!((equal_loudness(1e9) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn compress_weights_and_takes_cube_root() {
        let eql = EqualLoudness::new(&[0.0, 1000.0, 2000.0, 4000.0]);
        let w = eql.weights().to_vec();
        let mut bands = vec![5.0, 8.0, 27.0, 3.0];
        eql.compress(&mut bands);
        let b1 = (8.0 * w[1]).cbrt();
        let b2 = (27.0 * w[2]).cbrt();
        assert!((bands[1] - b1).abs() < 1e-12);
        assert!((bands[2] - b2).abs() < 1e-12);
        assert_eq!(bands[0], bands[1]);
        assert_eq!(bands[3], bands[2]);
    }

    #[test]
    fn silence_is_floored() {
        let eql = EqualLoudness::new(&[100.0, 500.0, 1500.0]);
        let mut bands = vec![0.0, -1.0, f64::NAN];
        eql.compress(&mut bands);
        let floor = BAND_ENERGY_FLOOR.powf(COMPRESSION_EXPONENT);
        assert_eq!(bands, vec![floor; 3]);
    }

    #[test]
    fn overflowed_band_stays_loudest() {
        let eql = EqualLoudness::new(&[0.0, 1000.0, 2000.0, 3000.0, 4000.0]);
        let mut bands = vec![1.0, 1.0, f64::INFINITY, 1.0, 1.0];
        eql.compress(&mut bands);
        assert_eq!(bands[2], f64::MAX.powf(COMPRESSION_EXPONENT));
        assert!(bands[2].is_finite());
        assert!(bands[2] > bands[1] && bands[2] > bands[3]);
    }

    #[proptest]
    fn output_is_finite_and_positive(
        #[strategy(prop::collection::vec(-1e6f64..1e12, 3..30))] energies: Vec<f64>,
    ) {
        let centers: Vec<f64> = (0..energies.len()).map(|i| 250.0 * i as f64).collect();
        let eql = EqualLoudness::new(&centers);
        let mut bands = energies;
        eql.compress(&mut bands);
        prop_assert!(bands.iter().all(|b| b.is_finite() && *b > 0.0));
    }
}
