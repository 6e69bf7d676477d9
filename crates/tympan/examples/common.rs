//! Helpers shared by the examples.

use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use hound::{SampleFormat, WavReader};
use tracing_subscriber::EnvFilter;

/// Reads a WAV file as mono `f32`, averaging channels.
///
/// Integer samples keep their integer scale (a 16-bit file yields values in
/// `-32768..=32767`), float samples are passed through.
pub(crate) fn read_wav_mono(path: &Path) -> Result<(Vec<f32>, u32)> {
    let mut reader =
        WavReader::open(path).with_context(|| format!("opening {}", path.display()))?;
    let spec = reader.spec();
    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .with_context(|| format!("decoding {}", path.display()))?,
        SampleFormat::Int => {
            if spec.bits_per_sample > 32 {
                bail!(
                    "unsupported bits per sample {} in {}",
                    spec.bits_per_sample,
                    path.display()
                );
            }
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32))
                .collect::<Result<_, _>>()
                .with_context(|| format!("decoding {}", path.display()))?
        }
    };

    let channels = usize::from(spec.channels.max(1));
    let mono = interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();
    Ok((mono, spec.sample_rate))
}

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
pub(crate) fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
}

pub(crate) fn format_vector(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:>10.4}"))
        .collect::<Vec<_>>()
        .join(" ")
}
