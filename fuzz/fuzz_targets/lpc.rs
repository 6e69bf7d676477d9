#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tympan::{FrameSpan, Framing, LpcConfig, Waveform};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    order: u8,
    conditioning: f64,
    frame_length: u16,
    hop_length: u16,
    samples: Vec<f32>,
}

fuzz_target!(|input: FuzzInput| {
    let config = LpcConfig {
        order: usize::from(input.order),
        conditioning: input.conditioning,
        ..LpcConfig::default()
    };
    let wave = Waveform::new(&input.samples, 16000);

    if let Ok(solution) = tympan::lpc_with(wave, &config) {
        assert_eq!(solution.order(), config.order);
        assert!(solution.is_stable());
    }

    let framing = Framing {
        frame_length: FrameSpan::Samples(usize::from(input.frame_length)),
        hop_length: FrameSpan::Samples(usize::from(input.hop_length)),
        ..Framing::default()
    };
    if let Ok(frames) = tympan::lpc_frames(wave, &config, &framing) {
        for solution in frames.iter().flatten() {
            assert!(solution.is_stable());
        }
    }
});
