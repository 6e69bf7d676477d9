//! RASTA band-pass filtering of log-domain band trajectories.
//!
//! Every band is filtered independently along time with
//!
//! ```text
//! H(z) = (0.2 + 0.1 z^-1 - 0.1 z^-3 - 0.2 z^-4) / (1 - 0.94 z^-1)
//! ```
//!
//! i.e. a five-tap regression (delta) numerator followed by a leaky
//! integrator, which removes slowly varying channel effects and very fast
//! frame-to-frame changes. The filter is realised in transposed direct
//! form II with one four-sample delay line per band.

/// Numerator taps.
pub const RASTA_NUMERATOR: [f64; 5] = [0.2, 0.1, 0.0, -0.1, -0.2];

/// Pole of the integrator, the denominator is `[1, -RASTA_POLE]`.
pub const RASTA_POLE: f64 = 0.94;

const STATE_LEN: usize = RASTA_NUMERATOR.len() - 1;

/// Frames used to prime the delay line under [`RastaWarmup::Primed`].
pub const RASTA_PRIMING_FRAMES: usize = STATE_LEN;

/// How the filter state is initialised at the start of a waveform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RastaWarmup {
    /// The first [`RASTA_PRIMING_FRAMES`] frames only fill the delay line
    /// through the numerator and produce 0 (log domain). The full filter
    /// starts from that state.
    #[default]
    Primed,
    /// Start from a zero state and run the full filter from the first frame.
    Cold,
}

/// Per-waveform RASTA filter over `num_bands` parallel trajectories.
///
/// Frames must be fed strictly in time order.
#[derive(derive_more::Debug, Clone)]
pub struct RastaFilter {
    warmup: RastaWarmup,
    #[debug(skip)]
    state: Vec<[f64; STATE_LEN]>,
    frames_processed: usize,
}

impl RastaFilter {
    pub fn new(num_bands: usize, warmup: RastaWarmup) -> Self {
        Self {
            warmup,
            state: vec![[0.0; STATE_LEN]; num_bands],
            frames_processed: 0,
        }
    }

    pub fn num_bands(&self) -> usize {
        self.state.len()
    }

    pub fn warmup(&self) -> RastaWarmup {
        self.warmup
    }

    pub fn frames_processed(&self) -> usize {
        self.frames_processed
    }

    /// Clears the delay lines, as if no frame had been seen.
    pub fn reset(&mut self) {
        for z in &mut self.state {
            *z = [0.0; STATE_LEN];
        }
        self.frames_processed = 0;
    }

    /// Filters one frame of log-domain band values in place.
    pub fn process_frame(&mut self, log_bands: &mut [f64]) {
        debug_assert_eq!(log_bands.len(), self.state.len());
        let priming = self.warmup == RastaWarmup::Primed
            && self.frames_processed < RASTA_PRIMING_FRAMES;
        let pole = if priming { 0.0 } else { RASTA_POLE };

        for (x, z) in log_bands.iter_mut().zip(&mut self.state) {
            let input = *x;
            let y = RASTA_NUMERATOR[0] * input + z[0];
            // Denominator is [1, -pole, 0, 0, 0].
            z[0] = RASTA_NUMERATOR[1] * input + z[1] + pole * y;
            for j in 1..STATE_LEN - 1 {
                z[j] = RASTA_NUMERATOR[j + 1] * input + z[j + 1];
            }
            z[STATE_LEN - 1] = RASTA_NUMERATOR[STATE_LEN] * input;
            *x = if priming { 0.0 } else { y };
        }
        self.frames_processed += 1;
        if priming && self.frames_processed == RASTA_PRIMING_FRAMES {
            tracing::trace!(num_bands = self.state.len(), "RASTA delay lines primed");
        }
    }

    /// Filters one frame of positive band values: `exp(filter(ln(x)))`.
    pub fn process_spectrum(&mut self, bands: &mut [f64]) {
        for b in bands.iter_mut() {
            *b = b.ln();
        }
        self.process_frame(bands);
        for b in bands.iter_mut() {
            *b = b.exp();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Direct-form difference equation over a whole trajectory.
    fn direct_form(x: &[f64]) -> Vec<f64> {
        let mut y = vec![0.0; x.len()];
        for n in 0..x.len() {
            let mut acc = 0.0;
            for (k, b) in RASTA_NUMERATOR.iter().enumerate() {
                if n >= k {
                    acc += b * x[n - k];
                }
            }
            if n >= 1 {
                acc += RASTA_POLE * y[n - 1];
            }
            y[n] = acc;
        }
        y
    }

    fn run(filter: &mut RastaFilter, x: &[f64]) -> Vec<f64> {
        x.iter()
            .map(|&v| {
                let mut frame = [v];
                filter.process_frame(&mut frame);
                frame[0]
            })
            .collect()
    }

    fn trajectory() -> Vec<f64> {
        (0..40).map(|n| (0.3 * n as f64).sin() + 0.05 * n as f64).collect()
    }

    #[test]
    fn cold_start_matches_difference_equation() {
        let x = trajectory();
        let got = run(&mut RastaFilter::new(1, RastaWarmup::Cold), &x);
        for (g, w) in got.iter().zip(direct_form(&x)) {
            assert!((g - w).abs() < 1e-12, "{g} vs {w}");
        }
    }

    #[test]
    fn primed_start_outputs_zero_then_continues_from_fir_state() {
        let x = trajectory();
        let got = run(&mut RastaFilter::new(1, RastaWarmup::Primed), &x);
        assert_eq!(&got[..4], &[0.0; 4]);

        // From frame 4 on: y[n] = Σ b[k] x[n-k] + 0.94 y[n-1], with the
        // recursive part starting at zero.
        let mut prev = 0.0;
        for n in 4..x.len() {
            let fir: f64 = RASTA_NUMERATOR
                .iter()
                .enumerate()
                .map(|(k, b)| b * x[n - k])
                .sum();
            let want = fir + RASTA_POLE * prev;
            assert!((got[n] - want).abs() < 1e-12, "frame {n}: {} vs {want}", got[n]);
            prev = want;
        }
    }

    #[test]
    fn constant_log_trajectory_decays_to_zero() {
        // The numerator sums to zero, so a constant channel is removed.
        let x = vec![3.0; 400];
        let got = run(&mut RastaFilter::new(1, RastaWarmup::Primed), &x);
        assert!(got[399].abs() < 1e-9);
        assert!(got.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn bands_are_independent() {
        let mut joint = RastaFilter::new(2, RastaWarmup::Cold);
        let mut single = RastaFilter::new(1, RastaWarmup::Cold);
        let x = trajectory();
        for &v in &x {
            let mut pair = [v, -2.0 * v];
            joint.process_frame(&mut pair);
            let mut one = [v];
            single.process_frame(&mut one);
            assert_eq!(pair[0], one[0]);
        }
    }

    #[test]
    fn reset_restarts_warmup() {
        let mut filter = RastaFilter::new(3, RastaWarmup::Primed);
        let x = trajectory();
        let first = run(&mut RastaFilter::new(1, RastaWarmup::Primed), &x);
        for _ in 0..10 {
            filter.process_frame(&mut [1.0, 2.0, 3.0]);
        }
        filter.reset();
        assert_eq!(filter.frames_processed(), 0);
        for (n, &v) in x.iter().enumerate() {
            let mut frame = [v, v, v];
            filter.process_frame(&mut frame);
            assert_eq!(frame[0], first[n]);
        }
    }

    #[test]
    fn spectrum_of_ones_primes_to_ones() {
        let mut filter = RastaFilter::new(4, RastaWarmup::Primed);
        let mut bands = [1.0; 4];
        filter.process_spectrum(&mut bands);
        assert_eq!(bands, [1.0; 4]);
    }
}
