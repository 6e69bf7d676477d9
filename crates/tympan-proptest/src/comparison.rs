//! Element-wise comparison of float buffers.

use std::fmt;

/// Outcome of [`compare_f64`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub len: usize,
    pub tolerance: f64,
    /// Number of positions whose difference exceeds the tolerance (a length
    /// mismatch counts every unmatched position).
    pub mismatches: usize,
    pub max_abs_diff: f64,
    /// Index, actual, expected of the first mismatch.
    pub first_mismatch: Option<(usize, f64, f64)>,
}

impl ComparisonResult {
    pub fn is_match(&self) -> bool {
        self.mismatches == 0
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} mismatches (tolerance {}, max |diff| {:e})",
            self.mismatches, self.len, self.tolerance, self.max_abs_diff
        )?;
        if let Some((i, actual, expected)) = self.first_mismatch {
            write!(f, ", first at [{i}]: {actual} != {expected}")?;
        }
        Ok(())
    }
}

/// Compares `actual` against `expected` with an absolute tolerance.
///
/// NaN never matches, not even another NaN.
pub fn compare_f64(actual: &[f64], expected: &[f64], tolerance: f64) -> ComparisonResult {
    let len = actual.len().max(expected.len());
    let mut mismatches = actual.len().abs_diff(expected.len());
    let mut max_abs_diff: f64 = 0.0;
    let mut first_mismatch = None;
    for (i, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        let diff = (a - e).abs();
        if diff.is_nan() {
            max_abs_diff = f64::NAN;
        } else if !max_abs_diff.is_nan() {
            max_abs_diff = max_abs_diff.max(diff);
        }
        if diff.is_nan() || diff > tolerance {
            mismatches += 1;
            first_mismatch.get_or_insert((i, a, e));
        }
    }
    ComparisonResult {
        len,
        tolerance,
        mismatches,
        max_abs_diff,
        first_mismatch,
    }
}
