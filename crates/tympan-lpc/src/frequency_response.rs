//! Power response of the all-pole model `error / |A(e^{jω})|²`.

use std::f64::consts::PI;

use crate::levinson::LpcSolution;

/// Samples the model's power response at `num_points` frequencies evenly
/// spaced over `[0, π]` (both ends included).
pub fn power_response(solution: &LpcSolution, num_points: usize) -> Vec<f64> {
    let step = if num_points > 1 {
        PI / (num_points - 1) as f64
    } else {
        0.0
    };
    (0..num_points)
        .map(|i| {
            let omega = step * i as f64;
            let (mut re, mut im) = (1.0, 0.0);
            for (k, a) in solution.coefficients.iter().enumerate() {
                let phase = omega * (k + 1) as f64;
                re -= a * phase.cos();
                im += a * phase.sin();
            }
            solution.error / (re * re + im * im)
        })
        .collect()
}

/// Frequency in Hz of the strongest peak of the model's power response,
/// evaluated on a `num_points` grid.
pub fn peak_frequency_hz(solution: &LpcSolution, num_points: usize, sample_rate_hz: f64) -> f64 {
    let response = power_response(solution, num_points);
    let peak = response
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map_or(0, |(i, _)| i);
    if num_points > 1 {
        peak as f64 * sample_rate_hz / 2.0 / (num_points - 1) as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_model_has_flat_response() {
        let sol = LpcSolution {
            coefficients: vec![0.0; 4],
            error: 3.0,
            reflection: vec![0.0; 4],
        };
        for p in power_response(&sol, 33) {
            assert!((p - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn resonator_peaks_at_its_pole_angle() {
        // Poles at r e^{±jθ}: A(z) = 1 - 2r cosθ z^-1 + r² z^-2.
        let (r, theta) = (0.98f64, 0.25 * PI);
        let sol = LpcSolution {
            coefficients: vec![2.0 * r * theta.cos(), -r * r],
            error: 1.0,
            reflection: vec![0.0; 2],
        };
        let peak = peak_frequency_hz(&sol, 4097, 16000.0);
        assert!((peak - 2000.0).abs() < 20.0, "peak at {peak} Hz");
    }

    #[test]
    fn first_order_lowpass_response_at_dc_and_nyquist() {
        let sol = LpcSolution {
            coefficients: vec![0.5],
            error: 1.0,
            reflection: vec![0.5],
        };
        let resp = power_response(&sol, 3);
        assert!((resp[0] - 4.0).abs() < 1e-12);
        assert!((resp[2] - 1.0 / 2.25).abs() < 1e-12);
    }
}
