//! Extractor configuration.
//!
//! Plain structs with public fields and `Default` impls; optional stages are
//! `Option<Stage>`. Validation happens when an extractor is built.

use std::num::NonZeroU32;

use tympan_common_audio::pre_emphasis::DEFAULT_PRE_EMPHASIS_COEFFICIENT;
use tympan_lpc::Lifter;
use tympan_plp::RastaWarmup;
use tympan_plp::bark::MIN_NUM_BANDS;

use crate::error::ConfigError;

pub use tympan_common_audio::framer::FramePolicy;
pub use tympan_common_audio::window::WindowKind;

/// Prediction order of the PLP all-pole model, giving cepstra `c1..c13`.
pub const DEFAULT_PLP_ORDER: usize = 13;

/// Prediction order of the single-segment LPC routine.
pub const DEFAULT_LPC_ORDER: usize = 13;

/// A length given either in samples or in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameSpan {
    Samples(usize),
    /// Converted with `round(seconds * sample_rate)`.
    Seconds(f64),
}

impl FrameSpan {
    /// Length in samples at `sample_rate_hz`. Negative or non-finite
    /// durations resolve to zero.
    pub fn to_samples(self, sample_rate_hz: u32) -> usize {
        match self {
            Self::Samples(n) => n,
            Self::Seconds(s) => {
                let n = (s * f64::from(sample_rate_hz)).round();
                if n.is_finite() && n > 0.0 { n as usize } else { 0 }
            }
        }
    }
}

/// How the signal is cut into analysis frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Framing {
    /// Frame length (default: 25 ms).
    pub frame_length: FrameSpan,
    /// Distance between frame starts (default: 10 ms).
    pub hop_length: FrameSpan,
    /// Analysis window (default: Hamming).
    pub window: WindowKind,
    /// Handling of the trailing partial frame (default: dropped).
    pub policy: FramePolicy,
}

impl Default for Framing {
    fn default() -> Self {
        Self {
            frame_length: FrameSpan::Seconds(0.025),
            hop_length: FrameSpan::Seconds(0.010),
            window: WindowKind::default(),
            policy: FramePolicy::default(),
        }
    }
}

impl Framing {
    /// Frame and hop lengths in samples at `sample_rate_hz`.
    pub fn resolve(&self, sample_rate_hz: u32) -> Result<(usize, usize), ConfigError> {
        let frame_length = self.frame_length.to_samples(sample_rate_hz);
        if frame_length == 0 {
            return Err(ConfigError::ZeroFrameLength);
        }
        let hop_length = self.hop_length.to_samples(sample_rate_hz);
        if hop_length == 0 {
            return Err(ConfigError::ZeroHopLength);
        }
        Ok((frame_length, hop_length))
    }

    /// Rejects spans that are zero at every sample rate.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let zero = |span: FrameSpan| match span {
            FrameSpan::Samples(n) => n == 0,
            FrameSpan::Seconds(s) => !(s.is_finite() && s > 0.0),
        };
        if zero(self.frame_length) {
            return Err(ConfigError::ZeroFrameLength);
        }
        if zero(self.hop_length) {
            return Err(ConfigError::ZeroHopLength);
        }
        Ok(())
    }
}

/// RASTA filtering of the log auditory spectrum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rasta {
    /// Filter state at the start of each waveform (default: primed).
    pub warmup: RastaWarmup,
}

/// What to do with a frame whose Levinson-Durbin recursion breaks down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InstabilityPolicy {
    /// Emit all-zero cepstra for the frame, keep the error in
    /// [`PlpFrame::lpc`](crate::PlpFrame::lpc) and continue.
    #[default]
    ZeroFill,
    /// Fail the whole extraction with the first failing frame.
    Abort,
}

/// Configuration of the PLP / RASTA-PLP front end.
///
/// # Example
///
/// ```
/// use tympan::{PlpConfig, Rasta};
/// use tympan::config::FrameSpan;
///
/// let config = PlpConfig {
///     rasta: Some(Rasta::default()),
///     num_bands: Some(21),
///     ..Default::default()
/// };
/// assert_eq!(config.order, 13);
/// assert_eq!(config.framing.hop_length, FrameSpan::Seconds(0.010));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlpConfig {
    /// Prediction order `p` of the all-pole model fitted to the auditory
    /// spectrum; each frame carries cepstra `c1..cp` (default: 13).
    pub order: usize,
    /// Pre-emphasis applied to the whole waveform before framing
    /// (default: 0.97, 0 disables it).
    pub pre_emphasis_coefficient: f64,
    pub framing: Framing,
    /// FFT length, `None` for the next power of two of the frame length.
    pub transform_length: Option<usize>,
    /// Critical bands, `None` to derive them from the sample rate.
    pub num_bands: Option<usize>,
    /// RASTA filtering. Disabled (`None`) by default.
    pub rasta: Option<Rasta>,
    /// Cepstral lifter (default: `n^0.6`).
    pub lifter: Lifter,
    pub instability_policy: InstabilityPolicy,
    /// Keep each frame's auditory spectrum in the output.
    pub keep_auditory_spectrum: bool,
}

impl Default for PlpConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_PLP_ORDER,
            pre_emphasis_coefficient: DEFAULT_PRE_EMPHASIS_COEFFICIENT,
            framing: Framing::default(),
            transform_length: None,
            num_bands: None,
            rasta: None,
            lifter: Lifter::default(),
            instability_policy: InstabilityPolicy::default(),
            keep_auditory_spectrum: false,
        }
    }
}

impl PlpConfig {
    /// Enables default RASTA filtering or disables it.
    pub fn rasta(mut self, enabled: bool) -> Self {
        self.rasta = enabled.then(Rasta::default);
        self
    }

    /// Checks everything that does not depend on the sample rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.order == 0 {
            return Err(ConfigError::InvalidOrder { order: 0, min: 1 });
        }
        if !self.pre_emphasis_coefficient.is_finite() {
            return Err(ConfigError::InvalidPreEmphasis(
                self.pre_emphasis_coefficient,
            ));
        }
        if !self.lifter.is_valid() {
            return Err(ConfigError::InvalidLifter);
        }
        self.framing.validate()?;
        if self.transform_length == Some(0) {
            return Err(ConfigError::TransformTooShort {
                transform_length: 0,
                frame_length: 0,
            });
        }
        if let Some(num_bands) = self.num_bands {
            let min = MIN_NUM_BANDS;
            if num_bands < min {
                return Err(ConfigError::TooFewBands { num_bands, min });
            }
            // Lags 0..=order come from num_bands spectral samples.
            if self.order >= num_bands {
                return Err(ConfigError::OrderExceedsBands {
                    order: self.order,
                    num_bands,
                });
            }
        }
        Ok(())
    }
}

/// Configuration of plain autocorrelation LPC.
#[derive(Debug, Clone, PartialEq)]
pub struct LpcConfig {
    /// Prediction order `p` (default: 13).
    pub order: usize,
    /// Pre-emphasis applied before the analysis (default: 0.97).
    pub pre_emphasis_coefficient: f64,
    /// Window applied to the segment (default: rectangular, i.e. none).
    pub window: WindowKind,
    /// White-noise correction added to `r[0]` as a fraction of it
    /// (default: 0).
    pub conditioning: f64,
}

impl Default for LpcConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_LPC_ORDER,
            pre_emphasis_coefficient: DEFAULT_PRE_EMPHASIS_COEFFICIENT,
            window: WindowKind::Rectangular,
            conditioning: 0.0,
        }
    }
}

impl LpcConfig {
    pub fn with_order(order: usize) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.order == 0 {
            return Err(ConfigError::InvalidOrder {
                order: 0,
                min: 1,
            });
        }
        if !self.pre_emphasis_coefficient.is_finite() {
            return Err(ConfigError::InvalidPreEmphasis(
                self.pre_emphasis_coefficient,
            ));
        }
        if !(self.conditioning.is_finite() && self.conditioning >= 0.0) {
            return Err(ConfigError::InvalidConditioning(self.conditioning));
        }
        Ok(())
    }
}

/// HTK-style lifter of length `l`, `None` for `l == 0`.
pub fn htk_lifter(l: u32) -> Option<Lifter> {
    NonZeroU32::new(l).map(Lifter::Htk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_round_to_nearest_sample() {
        assert_eq!(FrameSpan::Seconds(0.025).to_samples(16_000), 400);
        assert_eq!(FrameSpan::Seconds(0.010).to_samples(16_000), 160);
        assert_eq!(FrameSpan::Seconds(0.025).to_samples(11_025), 276);
        assert_eq!(FrameSpan::Seconds(-1.0).to_samples(16_000), 0);
        assert_eq!(FrameSpan::Seconds(f64::NAN).to_samples(16_000), 0);
        assert_eq!(FrameSpan::Samples(512).to_samples(0), 512);
    }

    #[test]
    fn default_framing_resolves() {
        assert_eq!(Framing::default().resolve(8_000), Ok((200, 80)));
        assert_eq!(
            Framing::default().resolve(0),
            Err(ConfigError::ZeroFrameLength)
        );
    }

    #[test]
    fn rasta_helper_toggles_stage() {
        assert_eq!(PlpConfig::default().rasta, None);
        assert_eq!(
            PlpConfig::default().rasta(true).rasta,
            Some(Rasta {
                warmup: RastaWarmup::Primed
            })
        );
        assert_eq!(PlpConfig::default().rasta(true).rasta(false).rasta, None);
    }

    #[test]
    fn plp_validation() {
        assert_eq!(PlpConfig::default().validate(), Ok(()));
        let bad = |config: PlpConfig| config.validate().unwrap_err();
        assert_eq!(
            bad(PlpConfig {
                order: 0,
                ..Default::default()
            }),
            ConfigError::InvalidOrder { order: 0, min: 1 }
        );
        assert_eq!(
            PlpConfig {
                order: 1,
                ..Default::default()
            }
            .validate(),
            Ok(())
        );
        assert!(matches!(
            bad(PlpConfig {
                pre_emphasis_coefficient: f64::INFINITY,
                ..Default::default()
            }),
            ConfigError::InvalidPreEmphasis(_)
        ));
        assert_eq!(
            bad(PlpConfig {
                lifter: Lifter::Exponent(f64::NAN),
                ..Default::default()
            }),
            ConfigError::InvalidLifter
        );
        assert_eq!(
            bad(PlpConfig {
                framing: Framing {
                    hop_length: FrameSpan::Samples(0),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ConfigError::ZeroHopLength
        );
        assert_eq!(
            bad(PlpConfig {
                num_bands: Some(2),
                ..Default::default()
            }),
            ConfigError::TooFewBands {
                num_bands: 2,
                min: 3
            }
        );
        assert_eq!(
            bad(PlpConfig {
                num_bands: Some(13),
                ..Default::default()
            }),
            ConfigError::OrderExceedsBands {
                order: 13,
                num_bands: 13
            }
        );
        assert_eq!(
            PlpConfig {
                num_bands: Some(14),
                ..Default::default()
            }
            .validate(),
            Ok(())
        );
    }

    #[test]
    fn lpc_validation() {
        assert_eq!(LpcConfig::default().validate(), Ok(()));
        assert_eq!(
            LpcConfig::with_order(0).validate(),
            Err(ConfigError::InvalidOrder { order: 0, min: 1 })
        );
        assert_eq!(
            LpcConfig {
                conditioning: -0.1,
                ..Default::default()
            }
            .validate(),
            Err(ConfigError::InvalidConditioning(-0.1))
        );
        assert!(htk_lifter(0).is_none());
        assert!(matches!(htk_lifter(22), Some(Lifter::Htk(_))));
    }
}
