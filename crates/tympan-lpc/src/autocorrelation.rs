//! Biased time-domain autocorrelation.

/// `r[k] = Σ_{n=0}^{N-1-k} x[n] x[n+k]` for `k = 0..=max_lag`.
///
/// Lags at or beyond the signal length are zero.
pub fn autocorrelation(signal: &[f64], max_lag: usize) -> Vec<f64> {
    (0..=max_lag)
        .map(|k| {
            if k >= signal.len() {
                return 0.0;
            }
            signal
                .iter()
                .zip(&signal[k..])
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_strategy::proptest;

    #[test]
    fn small_example() {
        let r = autocorrelation(&[1.0, 2.0, 3.0], 4);
        assert_eq!(r, vec![14.0, 8.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn empty_signal_is_all_zero() {
        assert_eq!(autocorrelation(&[], 2), vec![0.0; 3]);
    }

    #[proptest]
    fn lag_zero_dominates(
        #[strategy(prop::collection::vec(-100.0f64..100.0, 1..300))] x: Vec<f64>,
        #[strategy(0usize..40)] max_lag: usize,
    ) {
        let r = autocorrelation(&x, max_lag);
        prop_assert_eq!(r.len(), max_lag + 1);
        prop_assert!(r[0] >= 0.0);
        for &v in &r {
            prop_assert!(v.abs() <= r[0] * (1.0 + 1e-12) + 1e-9);
        }
    }
}
