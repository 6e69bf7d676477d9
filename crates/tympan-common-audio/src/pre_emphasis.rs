//! First-order pre-emphasis filter.
//!
//! `y[0] = x[0]`, `y[n] = x[n] - a * x[n - 1]`. Boosts the high end of the
//! spectrum by roughly 6 dB/octave, flattening the spectral tilt of voiced
//! speech before linear prediction.

/// Pre-emphasis coefficient used by the PLP and LPC front ends.
pub const DEFAULT_PRE_EMPHASIS_COEFFICIENT: f64 = 0.97;

/// Applies pre-emphasis to a whole signal.
///
/// The output has the same length as the input; an empty input yields an
/// empty output. The first sample passes through unchanged.
pub fn pre_emphasis<T>(samples: &[T], coefficient: f64) -> Vec<f64>
where
    T: Copy + Into<f64>,
{
    let mut out = Vec::with_capacity(samples.len());
    let mut prev: Option<f64> = None;
    for &s in samples {
        let x: f64 = s.into();
        out.push(match prev {
            Some(p) => x - coefficient * p,
            None => x,
        });
        prev = Some(x);
    }
    out
}

/// Streaming pre-emphasis filter that keeps the last input sample across
/// blocks.
///
/// Feeding a signal in arbitrary block sizes produces the same output as
/// [`pre_emphasis`] on the concatenated signal.
#[derive(Debug, Clone)]
pub struct PreEmphasis {
    coefficient: f64,
    prev_sample: Option<f64>,
}

impl PreEmphasis {
    pub fn new(coefficient: f64) -> Self {
        Self {
            coefficient,
            prev_sample: None,
        }
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// Filters `samples` in place.
    pub fn process(&mut self, samples: &mut [f64]) {
        for sample in samples.iter_mut() {
            let input = *sample;
            if let Some(prev) = self.prev_sample {
                *sample = input - self.coefficient * prev;
            }
            self.prev_sample = Some(input);
        }
    }

    /// Forgets the previous sample; the next sample passes through unchanged.
    pub fn reset(&mut self) {
        self.prev_sample = None;
    }
}

impl Default for PreEmphasis {
    fn default() -> Self {
        Self::new(DEFAULT_PRE_EMPHASIS_COEFFICIENT)
    }
}
