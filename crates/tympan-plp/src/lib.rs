#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod bark;
pub mod critical_bands;
pub mod equal_loudness;
pub mod inverse_transform;
pub mod rasta;

mod error;

pub use critical_bands::CriticalBandFilterBank;
pub use equal_loudness::{BAND_ENERGY_FLOOR, EqualLoudness};
pub use error::BandLayoutError;
pub use inverse_transform::InverseCosineTransform;
pub use rasta::{RastaFilter, RastaWarmup};
