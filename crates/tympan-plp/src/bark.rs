//! Hz / Bark conversion.
//!
//! Uses the arcsinh approximation of the critical-band rate,
//! `z = 6 asinh(f / 600)`, and its exact inverse.

/// Smallest band count the auditory spectrum supports: the two edge bands are
/// copies of their neighbours, so at least one band must be measured.
pub const MIN_NUM_BANDS: usize = 3;

pub fn hz_to_bark(freq_hz: f64) -> f64 {
    6.0 * (freq_hz / 600.0).asinh()
}

pub fn bark_to_hz(bark: f64) -> f64 {
    600.0 * (bark / 6.0).sinh()
}

/// Nyquist frequency of `sample_rate_hz` on the Bark scale.
pub fn nyquist_bark(sample_rate_hz: u32) -> f64 {
    hz_to_bark(f64::from(sample_rate_hz) / 2.0)
}

/// Number of critical bands spanning `0..=nyquist` with roughly one band per
/// Bark: `ceil(nyquist_bark) + 1`.
///
/// 17 bands at 8 kHz, 21 at 16 kHz.
pub fn derived_num_bands(sample_rate_hz: u32) -> usize {
    nyquist_bark(sample_rate_hz).ceil() as usize + 1
}

/// Center frequencies in Hz of `num_bands` bands equally spaced in Bark from
/// 0 to the Nyquist frequency.
pub fn band_centers_hz(sample_rate_hz: u32, num_bands: usize) -> Vec<f64> {
    let step = band_step_bark(sample_rate_hz, num_bands);
    (0..num_bands)
        .map(|i| bark_to_hz(step * i as f64))
        .collect()
}

/// Bark distance between adjacent band centers.
pub(crate) fn band_step_bark(sample_rate_hz: u32, num_bands: usize) -> f64 {
    if num_bands < 2 {
        return 0.0;
    }
    nyquist_bark(sample_rate_hz) / (num_bands - 1) as f64
}
