//! Prints PLP (or RASTA-PLP) cepstra of a WAV file, one frame per line.
//!
//! ```sh
//! cargo run -p tympan --features examples --example plp -- speech.wav
//! cargo run -p tympan --features examples --example plp -- speech.wav --no-rasta --energy
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use tympan::config::htk_lifter;
use tympan::{Lifter, PlpConfig, PlpExtractor, Waveform};

mod common;

#[derive(Parser, Debug)]
#[command(about = "Extract PLP cepstra from a WAV file")]
struct Args {
    /// Input WAV file (multi-channel input is averaged to mono).
    input: PathBuf,

    /// Disable RASTA filtering.
    #[arg(long)]
    no_rasta: bool,

    /// Prediction order; one line carries this many cepstra.
    #[arg(long, default_value_t = 13)]
    order: usize,

    /// Use an HTK sinusoidal lifter of this length instead of n^0.6.
    #[arg(long)]
    htk_lifter: Option<u32>,

    /// Disable liftering.
    #[arg(long, conflicts_with = "htk_lifter")]
    no_lifter: bool,

    /// Print the log frame energy and the model's log gain first.
    #[arg(long)]
    energy: bool,
}

fn main() -> Result<()> {
    common::init_tracing();
    let args = Args::parse();

    let (samples, sample_rate_hz) = common::read_wav_mono(&args.input)?;
    let lifter = if args.no_lifter {
        Lifter::None
    } else {
        args.htk_lifter.and_then(htk_lifter).unwrap_or_default()
    };
    let config = PlpConfig {
        order: args.order,
        lifter,
        ..PlpConfig::default().rasta(!args.no_rasta)
    };

    let features = PlpExtractor::new(config)?.extract(Waveform::new(&samples, sample_rate_hz))?;
    tracing::info!(
        frames = features.len(),
        bands = features.num_bands,
        unstable = features.num_unstable(),
        "{}",
        args.input.display()
    );
    for frame in &features.frames {
        if args.energy {
            print!("{:>10.4} {:>10.4} ", frame.log_energy, frame.log_gain);
        }
        println!("{}", common::format_vector(&frame.cepstra));
    }
    Ok(())
}
