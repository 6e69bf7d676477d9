//! Slicing a signal into overlapping, windowed analysis frames.
//!
//! Frame `i` starts at sample `i * hop_length` and spans `frame_length`
//! samples. What happens to a trailing frame that runs past the end of the
//! signal is decided by [`FramePolicy`].

use std::fmt;

use crate::window::WindowKind;

/// What to do with frames that extend past the end of the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePolicy {
    /// Only frames that lie entirely inside the signal are produced:
    /// `floor((n - L) / H) + 1` frames for `n >= L`, none otherwise.
    #[default]
    Drop,
    /// Trailing partial frames are completed with zeros:
    /// `ceil((n - L) / H) + 1` frames for `n >= L`, one for `0 < n < L`.
    ZeroPad,
}

/// Error returned when creating a [`Framer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramerError {
    /// Frame length must be at least one sample.
    ZeroFrameLength,
    /// Hop length must be at least one sample.
    ZeroHopLength,
}

impl fmt::Display for FramerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFrameLength => f.write_str("frame length must be positive"),
            Self::ZeroHopLength => f.write_str("hop length must be positive"),
        }
    }
}

impl std::error::Error for FramerError {}

/// Number of frames produced for a signal of `signal_len` samples.
pub fn frame_count(
    signal_len: usize,
    frame_length: usize,
    hop_length: usize,
    policy: FramePolicy,
) -> usize {
    if signal_len == 0 || frame_length == 0 || hop_length == 0 {
        return 0;
    }
    match policy {
        FramePolicy::Drop if signal_len < frame_length => 0,
        FramePolicy::Drop => (signal_len - frame_length) / hop_length + 1,
        FramePolicy::ZeroPad if signal_len < frame_length => 1,
        FramePolicy::ZeroPad => (signal_len - frame_length).div_ceil(hop_length) + 1,
    }
}

/// Produces windowed analysis frames from a borrowed signal.
///
/// Frames are computed on demand, either by index (for data-parallel
/// consumers) or through [`Framer::frames`], which can be called any number
/// of times to restart the sequence.
#[derive(derive_more::Debug, Clone)]
pub struct Framer<'a> {
    #[debug("{} samples", signal.len())]
    signal: &'a [f64],
    frame_length: usize,
    hop_length: usize,
    #[debug(skip)]
    window: Vec<f64>,
    window_kind: WindowKind,
    policy: FramePolicy,
    num_frames: usize,
}

impl<'a> Framer<'a> {
    pub fn new(
        signal: &'a [f64],
        frame_length: usize,
        hop_length: usize,
        window_kind: WindowKind,
        policy: FramePolicy,
    ) -> Result<Self, FramerError> {
        if frame_length == 0 {
            return Err(FramerError::ZeroFrameLength);
        }
        if hop_length == 0 {
            return Err(FramerError::ZeroHopLength);
        }
        let num_frames = frame_count(signal.len(), frame_length, hop_length, policy);
        tracing::trace!(
            signal_len = signal.len(),
            frame_length,
            hop_length,
            num_frames,
            ?policy,
            "framer created"
        );
        Ok(Self {
            signal,
            frame_length,
            hop_length,
            window: window_kind.coefficients(frame_length),
            window_kind,
            policy,
            num_frames,
        })
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    pub fn hop_length(&self) -> usize {
        self.hop_length
    }

    pub fn window_kind(&self) -> WindowKind {
        self.window_kind
    }

    pub fn policy(&self) -> FramePolicy {
        self.policy
    }

    /// First sample of frame `index` in the source signal.
    pub fn frame_start(&self, index: usize) -> usize {
        index * self.hop_length
    }

    /// Copies the unwindowed samples of frame `index` into `out`, zero-filling
    /// anything past the end of the signal.
    ///
    /// Returns `false` (leaving `out` untouched) if `index` is out of range.
    pub fn copy_raw_frame(&self, index: usize, out: &mut [f64]) -> bool {
        debug_assert_eq!(out.len(), self.frame_length);
        if index >= self.num_frames {
            return false;
        }
        let start = self.frame_start(index).min(self.signal.len());
        let end = (start + self.frame_length).min(self.signal.len());
        let available = end - start;
        out[..available].copy_from_slice(&self.signal[start..end]);
        out[available..].fill(0.0);
        true
    }

    /// Unwindowed samples of frame `index`.
    pub fn raw_frame(&self, index: usize) -> Option<Vec<f64>> {
        let mut out = vec![0.0; self.frame_length];
        self.copy_raw_frame(index, &mut out).then_some(out)
    }

    /// Samples of frame `index` multiplied by the analysis window.
    pub fn windowed_frame(&self, index: usize) -> Option<Vec<f64>> {
        let mut out = self.raw_frame(index)?;
        self.apply_window(&mut out);
        Some(out)
    }

    /// Multiplies a frame of `frame_length` samples by the analysis window.
    pub fn apply_window(&self, frame: &mut [f64]) {
        debug_assert_eq!(frame.len(), self.window.len());
        for (s, w) in frame.iter_mut().zip(&self.window) {
            *s *= w;
        }
    }

    /// Iterates over all windowed frames in order.
    pub fn frames(&self) -> Frames<'_, 'a> {
        Frames {
            framer: self,
            next: 0,
        }
    }
}

/// Iterator over the windowed frames of a [`Framer`].
#[derive(Debug, Clone)]
pub struct Frames<'f, 'a> {
    framer: &'f Framer<'a>,
    next: usize,
}

impl Iterator for Frames<'_, '_> {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.framer.windowed_frame(self.next)?;
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.framer.num_frames.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_, '_> {}
