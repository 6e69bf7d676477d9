//! PLP / RASTA-PLP feature extraction.
//!
//! Per waveform: pre-emphasis, framing, then three stages over the frames.
//!
//! 1. Independent per frame: power spectrum, critical-band energies,
//!    equal-loudness weighting and cubic-root compression.
//! 2. In frame order: RASTA filtering of the log auditory spectrum, when
//!    enabled.
//! 3. Independent per frame: inverse cosine transform to autocorrelation,
//!    Levinson-Durbin, LPC cepstra and liftering.
//!
//! Stages 1 and 3 run data-parallel with the `parallel` feature.

use tympan_common_audio::framer::Framer;
use tympan_common_audio::pre_emphasis::pre_emphasis;
use tympan_fft::{PowerSpectrum, default_transform_length};
use tympan_lpc::{LevinsonError, LpcSolution, levinson_durbin, lpc_to_cepstrum};
use tympan_plp::bark::{MIN_NUM_BANDS, derived_num_bands};
use tympan_plp::{CriticalBandFilterBank, EqualLoudness, InverseCosineTransform, RastaFilter};

use crate::config::{InstabilityPolicy, PlpConfig};
use crate::error::{ConfigError, Error};
use crate::parallel::map_frames;
use crate::waveform::Waveform;

/// Floor of the frame energy before taking its log.
pub const LOG_ENERGY_FLOOR: f64 = f64::EPSILON;

/// Features of one analysis frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PlpFrame {
    /// Liftered cepstra `c1..c{order}`, all zero if the recursion failed.
    pub cepstra: Vec<f64>,
    /// `c0 = ln(error)` of the all-pole model, zero if the recursion failed.
    pub log_gain: f64,
    /// `ln` of the pre-emphasised frame energy before windowing.
    pub log_energy: f64,
    /// All-pole model of the auditory spectrum, or why it could not be
    /// computed.
    pub lpc: Result<LpcSolution, LevinsonError>,
    /// Auditory spectrum that was modelled, if requested.
    pub auditory_spectrum: Option<Vec<f64>>,
}

impl PlpFrame {
    pub fn is_stable(&self) -> bool {
        self.lpc.is_ok()
    }
}

/// Output of [`PlpExtractor::extract`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlpFeatures {
    pub frames: Vec<PlpFrame>,
    pub sample_rate_hz: u32,
    pub num_bands: usize,
    pub frame_length: usize,
    pub hop_length: usize,
    pub transform_length: usize,
}

impl PlpFeatures {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Cepstral vectors in frame order.
    pub fn cepstra(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        self.frames.iter().map(|f| f.cepstra.as_slice())
    }

    /// Number of frames whose recursion broke down.
    pub fn num_unstable(&self) -> usize {
        self.frames.iter().filter(|f| !f.is_stable()).count()
    }

    /// Start time of frame `index` in seconds.
    pub fn frame_time_secs(&self, index: usize) -> f64 {
        (index * self.hop_length) as f64 / f64::from(self.sample_rate_hz)
    }
}

/// Per-rate precomputed stages.
#[derive(Debug)]
struct PlpPlan {
    frame_length: usize,
    hop_length: usize,
    num_bands: usize,
    model_order: usize,
    spectrum: PowerSpectrum,
    filter_bank: CriticalBandFilterBank,
    loudness: EqualLoudness,
    inverse: InverseCosineTransform,
}

/// Frame after stage 1.
struct AuditoryFrame {
    log_energy: f64,
    spectrum: Vec<f64>,
}

/// Validated PLP front end.
///
/// Immutable once built: a single extractor can process any number of
/// waveforms, concurrently if needed. Each call builds its own FFT plan,
/// filterbank and RASTA state for the waveform's sample rate.
///
/// # Example
///
/// ```
/// use tympan::{PlpConfig, PlpExtractor, Waveform};
///
/// let samples: Vec<f32> = (0..16_000)
///     .map(|n| (2.0 * std::f32::consts::PI * 440.0 * n as f32 / 16_000.0).sin())
///     .collect();
/// let extractor = PlpExtractor::new(PlpConfig::default().rasta(true))?;
/// let features = extractor.extract(Waveform::new(&samples, 16_000))?;
/// assert_eq!(features.len(), 98);
/// assert_eq!(features.frames[0].cepstra.len(), 13);
/// # Ok::<(), tympan::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PlpExtractor {
    config: PlpConfig,
}

impl PlpExtractor {
    pub fn new(config: PlpConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlpConfig {
        &self.config
    }

    fn plan(&self, sample_rate_hz: u32) -> Result<PlpPlan, Error> {
        let config = &self.config;
        let model_order = config.order;

        // Configured bands must fit below Nyquist like derived ones do.
        let supported = derived_num_bands(sample_rate_hz);
        let required = config
            .num_bands
            .unwrap_or_else(|| MIN_NUM_BANDS.max(model_order + 1));
        if sample_rate_hz == 0 || supported < required {
            return Err(Error::UnsupportedRate {
                sample_rate_hz,
                num_bands: supported,
                required,
            });
        }
        let num_bands = config.num_bands.unwrap_or(supported);

        let (frame_length, hop_length) = config.framing.resolve(sample_rate_hz)?;
        if model_order >= frame_length {
            return Err(ConfigError::OrderExceedsFrame {
                order: model_order,
                frame_length,
            }
            .into());
        }

        let transform_length = match config.transform_length {
            Some(n) => n,
            None => default_transform_length(frame_length)
                .ok_or(ConfigError::FrameTooLong { frame_length })?,
        };
        let spectrum = PowerSpectrum::new(transform_length, frame_length)?;

        let filter_bank = CriticalBandFilterBank::new(sample_rate_hz, transform_length, num_bands)?;
        let loudness = EqualLoudness::new(&filter_bank.center_frequencies_hz());
        let inverse = InverseCosineTransform::new(num_bands, model_order + 1)?;

        tracing::debug!(
            sample_rate_hz,
            frame_length,
            hop_length,
            transform_length,
            num_bands,
            model_order,
            "PLP plan"
        );
        Ok(PlpPlan {
            frame_length,
            hop_length,
            num_bands,
            model_order,
            spectrum,
            filter_bank,
            loudness,
            inverse,
        })
    }

    /// Extracts one feature vector per frame of `wave`.
    ///
    /// A waveform shorter than one frame yields no frames under
    /// [`FramePolicy::Drop`](tympan_common_audio::framer::FramePolicy::Drop).
    pub fn extract(&self, wave: Waveform<'_>) -> Result<PlpFeatures, Error> {
        let plan = self.plan(wave.sample_rate_hz())?;
        if wave.is_empty() {
            return Err(Error::EmptySignal);
        }

        let emphasized = pre_emphasis(wave.samples(), self.config.pre_emphasis_coefficient);
        let framer = Framer::new(
            &emphasized,
            plan.frame_length,
            plan.hop_length,
            self.config.framing.window,
            self.config.framing.policy,
        )?;
        let num_frames = framer.num_frames();

        let mut auditory = map_frames(num_frames, |i| auditory_frame(&plan, &framer, i));
        tracing::trace!(num_frames, "auditory spectra");

        if let Some(rasta) = self.config.rasta {
            let mut filter = RastaFilter::new(plan.num_bands, rasta.warmup);
            for frame in &mut auditory {
                filter.process_spectrum(&mut frame.spectrum);
            }
            tracing::trace!(warmup = ?rasta.warmup, "RASTA filtered");
        }

        let frames = self.model_frames(&plan, &auditory)?;

        let features = PlpFeatures {
            frames,
            sample_rate_hz: wave.sample_rate_hz(),
            num_bands: plan.num_bands,
            frame_length: plan.frame_length,
            hop_length: plan.hop_length,
            transform_length: plan.spectrum.transform_length(),
        };
        tracing::debug!(
            frames = features.len(),
            unstable = features.num_unstable(),
            rasta = self.config.rasta.is_some(),
            "PLP extraction done"
        );
        Ok(features)
    }

    /// Stage 3 plus the instability policy.
    fn model_frames(&self, plan: &PlpPlan, auditory: &[AuditoryFrame]) -> Result<Vec<PlpFrame>, Error> {
        let frames = map_frames(auditory.len(), |i| self.model_frame(plan, &auditory[i]));
        for (frame, f) in frames.iter().enumerate() {
            let Err(source) = f.lpc else { continue };
            match self.config.instability_policy {
                InstabilityPolicy::Abort => {
                    return Err(Error::NumericalInstability { frame, source });
                }
                InstabilityPolicy::ZeroFill => {
                    tracing::warn!(frame, err = %source, "zero-filled unstable PLP frame");
                }
            }
        }
        Ok(frames)
    }

    fn model_frame(&self, plan: &PlpPlan, frame: &AuditoryFrame) -> PlpFrame {
        let order = plan.model_order;
        let lags = plan.inverse.apply(&frame.spectrum);
        let lpc = levinson_durbin(&lags, order);
        let (log_gain, cepstra) = match &lpc {
            Ok(solution) => {
                let mut c = lpc_to_cepstrum(solution, order + 1);
                self.config.lifter.apply(&mut c);
                (c[0], c.split_off(1))
            }
            Err(_) => (0.0, vec![0.0; order]),
        };
        PlpFrame {
            cepstra,
            log_gain,
            log_energy: frame.log_energy,
            lpc,
            auditory_spectrum: self
                .config
                .keep_auditory_spectrum
                .then(|| frame.spectrum.clone()),
        }
    }
}

fn auditory_frame(plan: &PlpPlan, framer: &Framer<'_>, index: usize) -> AuditoryFrame {
    let mut samples = vec![0.0; plan.frame_length];
    framer.copy_raw_frame(index, &mut samples);
    let energy: f64 = samples.iter().map(|s| s * s).sum();
    framer.apply_window(&mut samples);

    let power = plan.spectrum.compute(&samples);
    let mut spectrum = plan.filter_bank.apply(&power);
    plan.loudness.compress(&mut spectrum);
    AuditoryFrame {
        log_energy: energy.max(LOG_ENERGY_FLOOR).ln(),
        spectrum,
    }
}

/// PLP cepstra of `wave` with the default configuration, RASTA filtered if
/// `rasta` is set.
pub fn plp(wave: Waveform<'_>, rasta: bool) -> Result<PlpFeatures, Error> {
    PlpExtractor::new(PlpConfig::default().rasta(rasta))?.extract(wave)
}
