//! Prints the LPC analysis polynomial of a WAV file.
//!
//! Without `--frame-ms` the whole file is one segment, as a single
//! `[1, -a1, ..., -ap]` line. With it, one line per frame.
//!
//! ```sh
//! cargo run -p tympan --features examples --example lpc -- vowel.wav --order 16
//! cargo run -p tympan --features examples --example lpc -- speech.wav --frame-ms 25 --hop-ms 10
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use tympan::{FrameSpan, Framing, LpcConfig, LpcSolution, Waveform};

mod common;

#[derive(Parser, Debug)]
#[command(about = "Extract linear prediction coefficients from a WAV file")]
struct Args {
    /// Input WAV file (multi-channel input is averaged to mono).
    input: PathBuf,

    /// Prediction order.
    #[arg(long, default_value_t = 13)]
    order: usize,

    /// Analyse frames of this many milliseconds instead of the whole file.
    #[arg(long)]
    frame_ms: Option<f64>,

    /// Hop between frames in milliseconds.
    #[arg(long, default_value_t = 10.0, requires = "frame_ms")]
    hop_ms: f64,

    /// Print the strongest resonance of each model in Hz.
    #[arg(long)]
    peak: bool,
}

fn main() -> Result<()> {
    common::init_tracing();
    let args = Args::parse();

    let (samples, sample_rate_hz) = common::read_wav_mono(&args.input)?;
    let wave = Waveform::new(&samples, sample_rate_hz);
    let config = LpcConfig::with_order(args.order);
    let print = |solution: &LpcSolution| {
        let mut line = common::format_vector(&solution.error_filter());
        if args.peak {
            let peak = tympan::peak_frequency_hz(solution, 1024, f64::from(sample_rate_hz));
            line.push_str(&format!("  peak {peak:.0} Hz"));
        }
        println!("{line}");
    };

    let Some(frame_ms) = args.frame_ms else {
        print(&tympan::lpc_with(wave, &config)?);
        return Ok(());
    };

    let framing = Framing {
        frame_length: FrameSpan::Seconds(frame_ms / 1000.0),
        hop_length: FrameSpan::Seconds(args.hop_ms / 1000.0),
        ..Framing::default()
    };
    for (i, frame) in tympan::lpc_frames(wave, &config, &framing)?.iter().enumerate() {
        match frame {
            Ok(solution) => print(solution),
            Err(err) => tracing::warn!(frame = i, %err, "skipped"),
        }
    }
    Ok(())
}
