#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tympan::{PlpConfig, PlpExtractor, Waveform};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Sample rate index: 0=8k, 1=11.025k, 2=16k, 3=22.05k, 4=44.1k, 5=48k
    sample_rate_idx: u8,
    rasta: bool,
    keep_auditory_spectrum: bool,
    /// Audio samples (clamped to [-1, 1])
    samples: Vec<f32>,
}

fn sample_rate(idx: u8) -> u32 {
    match idx % 6 {
        0 => 8000,
        1 => 11025,
        2 => 16000,
        3 => 22050,
        4 => 44100,
        _ => 48000,
    }
}

/// Clamp to valid audio range [-1, 1], replacing NaN/inf with 0.
fn sanitize_sample(s: f32) -> f32 {
    if s.is_finite() { s.clamp(-1.0, 1.0) } else { 0.0 }
}

fuzz_target!(|input: FuzzInput| {
    if input.samples.is_empty() {
        return;
    }
    let rate = sample_rate(input.sample_rate_idx);
    let samples: Vec<f32> = input.samples.iter().copied().map(sanitize_sample).collect();
    let config = PlpConfig {
        keep_auditory_spectrum: input.keep_auditory_spectrum,
        ..PlpConfig::default().rasta(input.rasta)
    };

    let features = PlpExtractor::new(config)
        .expect("default config is valid")
        .extract(Waveform::new(&samples, rate))
        .expect("valid rate and non-empty input");

    for frame in &features.frames {
        assert_eq!(frame.cepstra.len(), 13);
        assert!(frame.cepstra.iter().all(|c| c.is_finite()), "{frame:?}");
        assert!(frame.log_gain.is_finite());
        assert!(frame.log_energy.is_finite());
        if let Some(spectrum) = &frame.auditory_spectrum {
            assert!(spectrum.iter().all(|&v| v.is_finite() && v > 0.0));
        }
    }
});
