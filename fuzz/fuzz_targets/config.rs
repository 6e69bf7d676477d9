#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tympan::config::{FramePolicy, WindowKind};
use tympan::{FrameSpan, Framing, InstabilityPolicy, Lifter, PlpConfig, PlpExtractor, Waveform};

/// Arbitrary, possibly invalid, configurations. Every combination must either
/// be rejected with an error or produce features; none may panic.
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    sample_rate_hz: u32,
    order: u8,
    frame_length: u16,
    hop_length: u16,
    transform_length: Option<u16>,
    num_bands: Option<u8>,
    pre_emphasis: f64,
    lifter_exponent: Option<f64>,
    zero_pad: bool,
    hann: bool,
    rasta: bool,
    abort: bool,
    samples: Vec<f32>,
}

fuzz_target!(|input: FuzzInput| {
    let config = PlpConfig {
        order: usize::from(input.order),
        pre_emphasis_coefficient: input.pre_emphasis,
        framing: Framing {
            frame_length: FrameSpan::Samples(usize::from(input.frame_length)),
            hop_length: FrameSpan::Samples(usize::from(input.hop_length)),
            window: if input.hann { WindowKind::Hann } else { WindowKind::Hamming },
            policy: if input.zero_pad { FramePolicy::ZeroPad } else { FramePolicy::Drop },
        },
        transform_length: input.transform_length.map(usize::from),
        num_bands: input.num_bands.map(usize::from),
        lifter: input.lifter_exponent.map_or(Lifter::None, Lifter::Exponent),
        instability_policy: if input.abort {
            InstabilityPolicy::Abort
        } else {
            InstabilityPolicy::ZeroFill
        },
        ..PlpConfig::default().rasta(input.rasta)
    };
    let order = config.order;

    let Ok(extractor) = PlpExtractor::new(config) else {
        return;
    };
    if let Ok(features) = extractor.extract(Waveform::new(&input.samples, input.sample_rate_hz)) {
        for frame in &features.frames {
            assert_eq!(frame.cepstra.len(), order);
        }
    }
});
