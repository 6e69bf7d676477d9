//! Levinson-Durbin recursion.
//!
//! Solves the Toeplitz normal equations of order `p` from an autocorrelation
//! sequence `r[0..=p]` in `O(p²)`. Each step `i` computes a reflection
//! coefficient
//!
//! ```text
//! k_i = (r[i] - Σ_{j=1}^{i-1} a[j] r[i-j]) / e_{i-1}
//! ```
//!
//! updates the predictor with its own time reversal
//! (`a[j] <- a[j] - k_i a[i-j]`, `a[i] = k_i`) and shrinks the prediction
//! error `e_i = e_{i-1} (1 - k_i²)`, starting from `e_0 = r[0]`.
//!
//! A step whose incoming error is not strictly positive, or whose reflection
//! coefficient reaches magnitude one, would yield a non minimum-phase
//! predictor. The recursion stops there and reports
//! [`LevinsonError::NumericalInstability`].

use std::fmt;
use std::iter;

/// Predictor obtained from the recursion.
#[derive(Debug, Clone, PartialEq)]
pub struct LpcSolution {
    /// Predictor coefficients `a[1..=p]`: `x[n] ≈ Σ a[k] x[n - k]`.
    pub coefficients: Vec<f64>,
    /// Final prediction-error energy `e_p`.
    pub error: f64,
    /// Reflection coefficients `k_1..=k_p`, one per recursion step.
    pub reflection: Vec<f64>,
}

impl LpcSolution {
    pub fn order(&self) -> usize {
        self.coefficients.len()
    }

    /// Gain of the all-pole model, `sqrt(error)`.
    pub fn gain(&self) -> f64 {
        self.error.sqrt()
    }

    /// Analysis polynomial `[1, -a1, ..., -ap]`, i.e. `A(z) = 1 - Σ a[k] z^-k`.
    pub fn error_filter(&self) -> Vec<f64> {
        iter::once(1.0)
            .chain(self.coefficients.iter().map(|a| -a))
            .collect()
    }

    /// Whether every reflection coefficient lies strictly inside the unit
    /// interval, i.e. `1 / A(z)` is stable.
    pub fn is_stable(&self) -> bool {
        self.reflection.iter().all(|k| k.abs() < 1.0)
    }
}

/// Error returned by [`levinson_durbin`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevinsonError {
    /// The prediction order must be at least one.
    InvalidOrder,
    /// The autocorrelation sequence has fewer than `order + 1` lags.
    TooFewLags { needed: usize, got: usize },
    /// The recursion became degenerate at `step` (1-based): the incoming
    /// prediction error was not strictly positive, or the reflection
    /// coefficient had magnitude `>= 1` (or was not finite).
    NumericalInstability {
        step: usize,
        error: f64,
        reflection: Option<f64>,
    },
}

impl fmt::Display for LevinsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidOrder => f.write_str("prediction order must be at least 1"),
            Self::TooFewLags { needed, got } => write!(
                f,
                "autocorrelation has {got} lags, the recursion needs {needed}"
            ),
            Self::NumericalInstability {
                step,
                error,
                reflection: Some(k),
            } => write!(
                f,
                "unstable reflection coefficient {k} at step {step} (prediction error {error})"
            ),
            Self::NumericalInstability {
                step,
                error,
                reflection: None,
            } => write!(
                f,
                "degenerate prediction error {error} before step {step}"
            ),
        }
    }
}

impl std::error::Error for LevinsonError {}

/// Runs the Levinson-Durbin recursion of order `order` on `r[0..=order]`.
///
/// Extra lags in `r` are ignored.
pub fn levinson_durbin(r: &[f64], order: usize) -> Result<LpcSolution, LevinsonError> {
    if order == 0 {
        return Err(LevinsonError::InvalidOrder);
    }
    if r.len() < order + 1 {
        return Err(LevinsonError::TooFewLags {
            needed: order + 1,
            got: r.len(),
        });
    }

    let mut a = vec![0.0; order + 1];
    let mut prev = vec![0.0; order + 1];
    let mut reflection = Vec::with_capacity(order);
    let mut error = r[0];

    for i in 1..=order {
        if !(error.is_finite() && error > 0.0) {
            return Err(LevinsonError::NumericalInstability {
                step: i,
                error,
                reflection: None,
            });
        }

        let acc = r[i] - (1..i).map(|j| a[j] * r[i - j]).sum::<f64>();
        let k = acc / error;
        if !(k.is_finite() && k.abs() < 1.0) {
            return Err(LevinsonError::NumericalInstability {
                step: i,
                error,
                reflection: Some(k),
            });
        }

        prev[..i].copy_from_slice(&a[..i]);
        for j in 1..i {
            a[j] = prev[j] - k * prev[i - j];
        }
        a[i] = k;
        error *= 1.0 - k * k;
        reflection.push(k);
    }

    Ok(LpcSolution {
        coefficients: a[1..].to_vec(),
        error,
        reflection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_strategy::proptest;
    use tympan_proptest::generators::{KnownAllPole, reflection_coefficients};

    #[test]
    fn first_order_process() {
        // AR(1) with pole 0.9 and unit innovation: r[k] = 0.9^k / (1 - 0.81).
        let r0 = 1.0 / (1.0 - 0.81);
        let r = [r0, 0.9 * r0, 0.81 * r0];
        let sol = levinson_durbin(&r, 2).unwrap();
        assert!((sol.coefficients[0] - 0.9).abs() < 1e-12);
        assert!(sol.coefficients[1].abs() < 1e-12);
        assert!((sol.error - 1.0).abs() < 1e-12);
        assert!((sol.reflection[0] - 0.9).abs() < 1e-12);
        assert!(sol.reflection[1].abs() < 1e-12);
    }

    #[test]
    fn white_noise_gives_zero_predictor() {
        let r = [2.5, 0.0, 0.0, 0.0];
        let sol = levinson_durbin(&r, 3).unwrap();
        assert_eq!(sol.coefficients, vec![0.0; 3]);
        assert_eq!(sol.error, 2.5);
        assert!(sol.is_stable());
    }

    #[test]
    fn error_filter_negates_predictor() {
        let sol = LpcSolution {
            coefficients: vec![0.5, -0.25],
            error: 1.0,
            reflection: vec![0.4, -0.25],
        };
        assert_eq!(sol.error_filter(), vec![1.0, -0.5, 0.25]);
        assert_eq!(sol.order(), 2);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!(levinson_durbin(&[1.0], 0), Err(LevinsonError::InvalidOrder));
        assert_eq!(
            levinson_durbin(&[1.0, 0.5], 3),
            Err(LevinsonError::TooFewLags { needed: 4, got: 2 })
        );
    }

    #[test]
    fn silent_input_is_reported_at_first_step() {
        let err = levinson_durbin(&[0.0; 5], 4).unwrap_err();
        assert_eq!(
            err,
            LevinsonError::NumericalInstability {
                step: 1,
                error: 0.0,
                reflection: None,
            }
        );
    }

    #[test]
    fn perfectly_predictable_input_is_reported() {
        // A constant signal: r[k] = r[0] for every lag, so k_1 = 1.
        let err = levinson_durbin(&[3.0; 6], 5).unwrap_err();
        assert_eq!(
            err,
            LevinsonError::NumericalInstability {
                step: 1,
                error: 3.0,
                reflection: Some(1.0),
            }
        );
    }

    #[test]
    fn non_positive_definite_sequence_is_reported() {
        // |r[1]| > r[0] cannot come from a real signal.
        let err = levinson_durbin(&[1.0, 1.5, 0.2], 2).unwrap_err();
        assert!(matches!(
            err,
            LevinsonError::NumericalInstability { step: 1, reflection: Some(k), .. } if k > 1.0
        ));
    }

    #[test]
    fn nan_input_is_reported() {
        let err = levinson_durbin(&[1.0, f64::NAN, 0.0], 2).unwrap_err();
        assert!(matches!(
            err,
            LevinsonError::NumericalInstability { step: 1, .. }
        ));
    }

    #[proptest]
    fn recovers_known_all_pole_model(
        #[strategy(reflection_coefficients(1..=12, 0.8))] ks: Vec<f64>,
        #[strategy(0.01f64..1000.0)] r0: f64,
    ) {
        let model = KnownAllPole::from_reflection(&ks, r0);
        let sol = levinson_durbin(&model.autocorrelation, ks.len()).unwrap();
        for (got, want) in sol.coefficients.iter().zip(&model.coefficients) {
            prop_assert!((got - want).abs() < 1e-6 * (1.0 + want.abs()), "got {got}, want {want}");
        }
        prop_assert!((sol.error - model.residual_energy).abs() <= 1e-6 * r0);
        for (got, want) in sol.reflection.iter().zip(&ks) {
            prop_assert!((got - want).abs() < 1e-6);
        }
    }

    #[proptest]
    fn positive_definite_sequences_give_stable_predictors(
        #[strategy(reflection_coefficients(1..=16, 0.9))] ks: Vec<f64>,
        #[strategy(0.01f64..1000.0)] r0: f64,
    ) {
        let model = KnownAllPole::from_reflection(&ks, r0);
        let sol = levinson_durbin(&model.autocorrelation, ks.len()).unwrap();
        prop_assert!(sol.is_stable());
        prop_assert!(sol.error > 0.0);
        prop_assert!(sol.error <= r0);
    }
}
