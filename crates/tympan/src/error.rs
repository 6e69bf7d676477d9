//! Errors returned by the feature extractors.

use std::fmt;

use tympan_common_audio::framer::FramerError;
use tympan_fft::PowerSpectrumError;
use tympan_lpc::LevinsonError;
use tympan_plp::BandLayoutError;
use tympan_plp::bark::MIN_NUM_BANDS;

/// Invalid extractor configuration, detected before any frame is processed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The order is below the minimum the extractor needs.
    InvalidOrder { order: usize, min: usize },
    /// The frame length resolved to zero samples.
    ZeroFrameLength,
    /// The hop length resolved to zero samples.
    ZeroHopLength,
    /// The prediction order must be smaller than the frame length.
    OrderExceedsFrame { order: usize, frame_length: usize },
    /// The auditory spectrum has too few critical bands for `order + 1`
    /// autocorrelation lags.
    OrderExceedsBands { order: usize, num_bands: usize },
    /// No power-of-two transform can hold a frame this long.
    FrameTooLong { frame_length: usize },
    /// The spectral transform cannot hold a whole frame.
    TransformTooShort {
        transform_length: usize,
        frame_length: usize,
    },
    /// Fewer critical bands than the auditory spectrum needs.
    TooFewBands { num_bands: usize, min: usize },
    /// The pre-emphasis coefficient is not finite.
    InvalidPreEmphasis(f64),
    /// The lifter parameter is not finite.
    InvalidLifter,
    /// The white-noise correction is negative or not finite.
    InvalidConditioning(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidOrder { order, min } => {
                write!(f, "order {order} is invalid; expected at least {min}")
            }
            Self::ZeroFrameLength => f.write_str("frame length must be at least one sample"),
            Self::ZeroHopLength => f.write_str("hop length must be at least one sample"),
            Self::OrderExceedsFrame {
                order,
                frame_length,
            } => write!(
                f,
                "prediction order {order} must be smaller than the frame length {frame_length}"
            ),
            Self::OrderExceedsBands { order, num_bands } => write!(
                f,
                "prediction order {order} needs at least {} critical bands, got {num_bands}",
                order + 1
            ),
            Self::FrameTooLong { frame_length } => {
                write!(f, "frame length {frame_length} is too long for a spectral transform")
            }
            Self::TransformTooShort {
                transform_length,
                frame_length,
            } => write!(
                f,
                "transform length {transform_length} is shorter than the frame length {frame_length}"
            ),
            Self::TooFewBands { num_bands, min } => {
                write!(f, "{num_bands} critical bands configured, at least {min} required")
            }
            Self::InvalidPreEmphasis(a) => write!(f, "pre-emphasis coefficient {a} is not finite"),
            Self::InvalidLifter => f.write_str("lifter parameter is not finite"),
            Self::InvalidConditioning(c) => {
                write!(f, "white-noise correction {c} must be finite and non-negative")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<FramerError> for ConfigError {
    fn from(err: FramerError) -> Self {
        match err {
            FramerError::ZeroFrameLength => Self::ZeroFrameLength,
            FramerError::ZeroHopLength => Self::ZeroHopLength,
        }
    }
}

impl From<PowerSpectrumError> for ConfigError {
    fn from(err: PowerSpectrumError) -> Self {
        match err {
            PowerSpectrumError::ZeroLength => Self::TransformTooShort {
                transform_length: 0,
                frame_length: 0,
            },
            PowerSpectrumError::TransformTooShort {
                transform_length,
                frame_length,
            } => Self::TransformTooShort {
                transform_length,
                frame_length,
            },
        }
    }
}

/// Error returned by [`PlpExtractor`](crate::PlpExtractor) and the LPC
/// routines.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The configuration is invalid.
    Configuration(ConfigError),
    /// The waveform has no samples.
    EmptySignal,
    /// Levinson-Durbin broke down on `frame` (the whole signal is frame 0
    /// for the single-segment LPC).
    NumericalInstability { frame: usize, source: LevinsonError },
    /// The sample rate cannot carry the critical bands the configuration
    /// needs below Nyquist.
    UnsupportedRate {
        sample_rate_hz: u32,
        num_bands: usize,
        required: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "invalid configuration: {err}"),
            Self::EmptySignal => f.write_str("waveform is empty"),
            Self::NumericalInstability { frame, source } => {
                write!(f, "linear prediction failed on frame {frame}: {source}")
            }
            Self::UnsupportedRate {
                sample_rate_hz,
                num_bands,
                required,
            } => write!(
                f,
                "sample rate {sample_rate_hz} Hz spans {num_bands} critical bands, {required} required"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::NumericalInstability { source, .. } => Some(source),
            Self::EmptySignal | Self::UnsupportedRate { .. } => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err)
    }
}

impl From<FramerError> for Error {
    fn from(err: FramerError) -> Self {
        Self::Configuration(err.into())
    }
}

impl From<PowerSpectrumError> for Error {
    fn from(err: PowerSpectrumError) -> Self {
        Self::Configuration(err.into())
    }
}

impl From<BandLayoutError> for Error {
    fn from(err: BandLayoutError) -> Self {
        match err {
            BandLayoutError::ZeroSampleRate => Self::UnsupportedRate {
                sample_rate_hz: 0,
                num_bands: 0,
                required: MIN_NUM_BANDS,
            },
            BandLayoutError::ZeroTransformLength => Self::Configuration(
                ConfigError::TransformTooShort {
                    transform_length: 0,
                    frame_length: 0,
                },
            ),
            BandLayoutError::TooFewBands { num_bands, min } => {
                Self::Configuration(ConfigError::TooFewBands { num_bands, min })
            }
            BandLayoutError::TooManyLags {
                num_lags,
                num_bands,
            } => Self::Configuration(ConfigError::OrderExceedsBands {
                order: num_lags.saturating_sub(1),
                num_bands,
            }),
        }
    }
}
