#![doc = include_str!("../README.md")]

#![deny(unsafe_code)]

pub mod framer;
pub mod pre_emphasis;
pub mod window;
