#![doc = include_str!("../README.md")]

#![deny(unsafe_code)]

pub mod power_spectrum;

pub use power_spectrum::{PowerSpectrum, PowerSpectrumError, default_transform_length};
