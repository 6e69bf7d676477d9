#![doc = include_str!("../README.md")]

#![deny(unsafe_code)]

pub mod analysis;
pub mod autocorrelation;
pub mod cepstrum;
pub mod frequency_response;
pub mod levinson;

pub use analysis::LpcAnalysis;
pub use autocorrelation::autocorrelation;
pub use cepstrum::{Lifter, lpc_to_cepstrum};
pub use levinson::{LevinsonError, LpcSolution, levinson_durbin};
