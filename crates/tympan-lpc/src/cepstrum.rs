//! LPC cepstra and cepstral liftering.

use std::f64::consts::PI;
use std::num::NonZeroU32;

use crate::levinson::LpcSolution;

/// Lifter exponent used by the PLP front end.
pub const DEFAULT_LIFTER_EXPONENT: f64 = 0.6;

/// Converts an all-pole model into `num_coeffs` cepstral coefficients.
///
/// `c[0] = ln(error)` carries the model gain. For `n >= 1`:
///
/// ```text
/// c[n] = a[n] + Σ_{k=1}^{n-1} (k / n) c[k] a[n-k]
/// ```
///
/// with `a[m] = 0` for `m > p`, so more coefficients than the model order can
/// be requested.
pub fn lpc_to_cepstrum(solution: &LpcSolution, num_coeffs: usize) -> Vec<f64> {
    let a = &solution.coefficients;
    let coeff = |m: usize| a.get(m - 1).copied().unwrap_or(0.0);

    let mut c = vec![0.0; num_coeffs];
    if num_coeffs == 0 {
        return c;
    }
    c[0] = solution.error.ln();
    for n in 1..num_coeffs {
        let mut acc = coeff(n);
        for k in 1..n {
            let a_nk = coeff(n - k);
            if a_nk != 0.0 {
                acc += (k as f64 / n as f64) * c[k] * a_nk;
            }
        }
        c[n] = acc;
    }
    c
}

/// Cepstral lifter applied to `c[1..]` (`c[0]` is never scaled).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lifter {
    /// Leave the cepstra untouched.
    None,
    /// Multiply `c[n]` by `n^e`.
    Exponent(f64),
    /// HTK-style sinusoidal lifter, `1 + L/2 sin(πn / L)`.
    Htk(NonZeroU32),
}

impl Default for Lifter {
    fn default() -> Self {
        Self::Exponent(DEFAULT_LIFTER_EXPONENT)
    }
}

impl Lifter {
    /// Whether the lifter parameters produce finite weights.
    pub fn is_valid(&self) -> bool {
        match *self {
            Self::Exponent(e) => e.is_finite(),
            Self::None | Self::Htk(_) => true,
        }
    }

    /// Weights for `num_coeffs` coefficients; the first weight is always 1.
    pub fn weights(&self, num_coeffs: usize) -> Vec<f64> {
        (0..num_coeffs)
            .map(|n| {
                if n == 0 {
                    return 1.0;
                }
                let n = n as f64;
                match *self {
                    Self::None => 1.0,
                    Self::Exponent(e) => n.powf(e),
                    Self::Htk(l) => {
                        let l = f64::from(l.get());
                        1.0 + l / 2.0 * (PI * n / l).sin()
                    }
                }
            })
            .collect()
    }

    pub fn apply(&self, cepstra: &mut [f64]) {
        if matches!(self, Self::None) {
            return;
        }
        let weights = self.weights(cepstra.len());
        for (c, w) in cepstra.iter_mut().zip(weights) {
            *c *= w;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levinson::levinson_durbin;

    fn solution(coefficients: Vec<f64>, error: f64) -> LpcSolution {
        LpcSolution {
            reflection: vec![0.0; coefficients.len()],
            coefficients,
            error,
        }
    }

    #[test]
    fn first_order_matches_closed_form() {
        // 1 / (1 - a z^-1) has cepstrum c[n] = a^n / n.
        let a = 0.7;
        let c = lpc_to_cepstrum(&solution(vec![a], 2.0), 8);
        assert!((c[0] - 2.0f64.ln()).abs() < 1e-12);
        for (n, &cn) in c.iter().enumerate().skip(1) {
            let expected = a.powi(n as i32) / n as f64;
            assert!((cn - expected).abs() < 1e-12, "c[{n}] = {cn}, want {expected}");
        }
    }

    #[test]
    fn recursion_matches_hand_computation() {
        let c = lpc_to_cepstrum(&solution(vec![0.5, -0.3, 0.1], 1.0), 4);
        assert_eq!(c[0], 0.0);
        assert!((c[1] - 0.5).abs() < 1e-12);
        // c2 = a2 + 1/2 c1 a1
        assert!((c[2] - (-0.3 + 0.5 * 0.5 * 0.5)).abs() < 1e-12);
        // c3 = a3 + 1/3 c1 a2 + 2/3 c2 a1
        let c2 = -0.3 + 0.125;
        let c3 = 0.1 + (1.0 / 3.0) * 0.5 * -0.3 + (2.0 / 3.0) * c2 * 0.5;
        assert!((c[3] - c3).abs() < 1e-12);
    }

    #[test]
    fn zero_predictor_gives_only_gain_term() {
        let sol = levinson_durbin(&[4.0, 0.0, 0.0], 2).unwrap();
        let c = lpc_to_cepstrum(&sol, 5);
        assert!((c[0] - 4.0f64.ln()).abs() < 1e-12);
        assert_eq!(&c[1..], &[0.0; 4]);
    }

    #[test]
    fn exponent_lifter_scales_by_index_power() {
        let mut c = vec![1.0; 4];
        Lifter::Exponent(0.6).apply(&mut c);
        assert_eq!(c[0], 1.0);
        assert_eq!(c[1], 1.0);
        assert!((c[2] - 2.0f64.powf(0.6)).abs() < 1e-12);
        assert!((c[3] - 3.0f64.powf(0.6)).abs() < 1e-12);
    }

    #[test]
    fn htk_lifter_weights() {
        let w = Lifter::Htk(NonZeroU32::new(22).unwrap()).weights(3);
        assert_eq!(w[0], 1.0);
        assert!((w[1] - (1.0 + 11.0 * (PI / 22.0).sin())).abs() < 1e-12);
    }

    #[test]
    fn no_lifter_is_identity() {
        let mut c = vec![0.3, -1.2, 4.0];
        Lifter::None.apply(&mut c);
        assert_eq!(c, vec![0.3, -1.2, 4.0]);
        assert!(!Lifter::Exponent(f64::NAN).is_valid());
        assert!(Lifter::default().is_valid());
    }
}
