//! Perceptual Linear Prediction (PLP), RASTA-PLP and LPC speech features.
//!
//! Converts a sample-rate-tagged waveform into one compact cepstral vector
//! per analysis frame, following Hermansky's PLP front end: pre-emphasis,
//! framing, power spectrum, Bark-spaced critical bands, equal-loudness
//! weighting, cubic-root compression, optional RASTA filtering of the log
//! band trajectories, an all-pole model of the auditory spectrum and its
//! cepstrum. Plain autocorrelation LPC shares the Levinson-Durbin solver.
//!
//! # Quick Start
//!
//! ```
//! use tympan::{PlpConfig, PlpExtractor, Waveform};
//!
//! let samples = vec![0.0f32; 16_000];
//! let extractor = PlpExtractor::new(PlpConfig::default().rasta(true))?;
//! let features = extractor.extract(Waveform::new(&samples, 16_000))?;
//! for cepstra in features.cepstra() {
//!     assert_eq!(cepstra.len(), 13);
//! }
//!
//! let lpc = tympan::lpc(Waveform::new(&[0.1, 0.4, -0.2, 0.3, 0.0, -0.5], 8_000), 2)?;
//! assert_eq!(lpc.error_filter().len(), 3);
//! # Ok::<(), tympan::Error>(())
//! ```
//!
//! The stages are available individually from the `tympan-common-audio`,
//! `tympan-fft`, `tympan-plp` and `tympan-lpc` crates.

pub mod config;
mod error;
mod lpc;
mod parallel;
mod plp;
mod waveform;

pub use config::{FrameSpan, Framing, InstabilityPolicy, LpcConfig, PlpConfig, Rasta};
pub use error::{ConfigError, Error};
pub use lpc::{lpc, lpc_frames, lpc_with};
pub use plp::{LOG_ENERGY_FLOOR, PlpExtractor, PlpFeatures, PlpFrame, plp};
pub use waveform::Waveform;

pub use tympan_lpc::frequency_response::{peak_frequency_hz, power_response};
pub use tympan_lpc::{LevinsonError, Lifter, LpcSolution};
pub use tympan_plp::RastaWarmup;
