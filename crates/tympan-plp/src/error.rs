use std::fmt;

/// Invalid shape for one of the auditory-spectrum stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandLayoutError {
    /// The sample rate must be positive.
    ZeroSampleRate,
    /// The spectral transform must have at least one sample.
    ZeroTransformLength,
    /// Fewer bands than the stage needs.
    TooFewBands { num_bands: usize, min: usize },
    /// More autocorrelation lags requested than there are bands.
    TooManyLags { num_lags: usize, num_bands: usize },
}

impl fmt::Display for BandLayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ZeroSampleRate => f.write_str("sample rate must be positive"),
            Self::ZeroTransformLength => f.write_str("transform length must be positive"),
            Self::TooFewBands { num_bands, min } => {
                write!(f, "{num_bands} bands configured, at least {min} required")
            }
            Self::TooManyLags {
                num_lags,
                num_bands,
            } => write!(
                f,
                "{num_lags} autocorrelation lags requested from {num_bands} bands"
            ),
        }
    }
}

impl std::error::Error for BandLayoutError {}
