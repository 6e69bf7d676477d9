//! Plain autocorrelation LPC of a waveform or of its frames.

use tympan_common_audio::framer::Framer;
use tympan_common_audio::pre_emphasis::pre_emphasis;
use tympan_common_audio::window::WindowKind;
use tympan_lpc::{LevinsonError, LpcAnalysis, LpcSolution};

use crate::config::{Framing, LpcConfig};
use crate::error::{ConfigError, Error};
use crate::parallel::map_frames;
use crate::waveform::Waveform;

fn analysis(config: &LpcConfig) -> LpcAnalysis {
    LpcAnalysis {
        order: config.order,
        window: config.window,
        conditioning: config.conditioning,
    }
}

/// Predictor of order `order` for the whole of `wave`, after 0.97
/// pre-emphasis.
///
/// [`LpcSolution::error_filter`] gives the analysis polynomial
/// `[1, -a1, ..., -ap]`.
pub fn lpc(wave: Waveform<'_>, order: usize) -> Result<LpcSolution, Error> {
    lpc_with(wave, &LpcConfig::with_order(order))
}

/// Single-segment LPC with an explicit configuration. Pass a
/// [`Waveform::segment`] to analyse part of a signal.
pub fn lpc_with(wave: Waveform<'_>, config: &LpcConfig) -> Result<LpcSolution, Error> {
    config.validate()?;
    if wave.is_empty() {
        return Err(Error::EmptySignal);
    }
    if config.order >= wave.len() {
        return Err(ConfigError::OrderExceedsFrame {
            order: config.order,
            frame_length: wave.len(),
        }
        .into());
    }
    let emphasized = pre_emphasis(wave.samples(), config.pre_emphasis_coefficient);
    analysis(config)
        .analyze(&emphasized)
        .map_err(|source| Error::NumericalInstability { frame: 0, source })
}

/// One predictor per frame of `wave`.
///
/// Frames are windowed with `framing.window`; `config.window` only applies
/// to single-segment analysis. Frames whose recursion breaks down are
/// reported in place rather than failing the call.
pub fn lpc_frames(
    wave: Waveform<'_>,
    config: &LpcConfig,
    framing: &Framing,
) -> Result<Vec<Result<LpcSolution, LevinsonError>>, Error> {
    config.validate()?;
    framing.validate()?;
    let sample_rate_hz = wave.sample_rate_hz();
    let (frame_length, hop_length) = framing.resolve(sample_rate_hz)?;
    if config.order >= frame_length {
        return Err(ConfigError::OrderExceedsFrame {
            order: config.order,
            frame_length,
        }
        .into());
    }
    if wave.is_empty() {
        return Err(Error::EmptySignal);
    }

    let emphasized = pre_emphasis(wave.samples(), config.pre_emphasis_coefficient);
    let framer = Framer::new(
        &emphasized,
        frame_length,
        hop_length,
        framing.window,
        framing.policy,
    )?;
    let analysis = LpcAnalysis {
        // The framer already applied the window.
        window: WindowKind::Rectangular,
        ..analysis(config)
    };
    let frames = map_frames(framer.num_frames(), |i| {
        let mut samples = vec![0.0; frame_length];
        framer.copy_raw_frame(i, &mut samples);
        framer.apply_window(&mut samples);
        analysis.analyze(&samples)
    });
    tracing::debug!(
        sample_rate_hz,
        frames = frames.len(),
        failed = frames.iter().filter(|f| f.is_err()).count(),
        "per-frame LPC done"
    );
    Ok(frames)
}
