//! Saturation-intensity sweeps for CO2 laser gain media.
//!
//! For every laser configuration and input power the Gaussian-beam
//! propagation integral is evaluated across a fixed ladder of saturation
//! intensities, and one report per laser is written.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
