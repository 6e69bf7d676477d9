//! Sample-rate-tagged audio input.

use std::ops::{Bound, RangeBounds};

/// Borrowed mono waveform.
///
/// Samples are in whatever scale the caller decoded them to (`[-1, 1]` floats
/// or raw 16-bit values converted to `f32`); the features are scale-dependent
/// only through the log gain and the log energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waveform<'a> {
    samples: &'a [f32],
    sample_rate_hz: u32,
}

impl<'a> Waveform<'a> {
    pub const fn new(samples: &'a [f32], sample_rate_hz: u32) -> Self {
        Self {
            samples,
            sample_rate_hz,
        }
    }

    #[inline]
    pub fn samples(&self) -> &'a [f32] {
        self.samples
    }

    #[inline]
    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds, zero when the sample rate is zero.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate_hz == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate_hz)
    }

    /// Sub-waveform over a range of sample indices, at the same rate.
    ///
    /// Returns `None` if the range is out of bounds.
    pub fn segment<R: RangeBounds<usize>>(&self, range: R) -> Option<Self> {
        let bounds: (Bound<usize>, Bound<usize>) =
            (range.start_bound().cloned(), range.end_bound().cloned());
        self.samples
            .get(bounds)
            .map(|samples| Self::new(samples, self.sample_rate_hz))
    }
}
