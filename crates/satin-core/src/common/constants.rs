//! Geometry and discretisation of the Gaussian-beam gain model.
//!
//! Lengths are in centimetres; the beam is sampled on a radial grid of
//! `RADIAL_STEPS` points spaced `DR` apart and propagated through
//! `AXIAL_SLICES` slices of thickness `DZ`.

use std::f64::consts::PI;

/// Beam radius.
pub const RAD: f64 = 0.18;
pub const RAD2: f64 = RAD * RAD;
/// Beam waist.
pub const W1: f64 = 0.3;
pub const DR: f64 = 0.002;
pub const DZ: f64 = 0.04;
/// CO2 laser wavelength.
pub const LAMBDA: f64 = 0.0106;
pub const AREA: f64 = PI * RAD2;
/// Rayleigh range of the waist.
pub const Z1: f64 = PI * (W1 * W1) / LAMBDA;
pub const Z12: f64 = Z1 * Z1;
pub const EXPR: f64 = 2.0 * PI * DR;

pub const AXIAL_SLICES: usize = 8001;
/// Slice index of the waist; integer half of `AXIAL_SLICES`.
pub const AXIAL_CENTER: usize = AXIAL_SLICES / 2;
/// Slices per unit length along the propagation axis.
pub const AXIAL_SLICES_PER_UNIT: f64 = 25.0;

/// Radial samples `r = n * DR` for `n` in `0..RADIAL_STEPS`, covering `[0, 0.5]`.
pub const RADIAL_STEPS: usize = 251;

/// Small-signal gain percentages are scaled by this before multiplying by `DZ`.
pub const GAIN_SCALE: f64 = 32_000.0;

#[cfg(test)]
mod tests {
    use super::{AREA, AXIAL_CENTER, DR, EXPR, RAD, RADIAL_STEPS, W1, Z1, Z12};
    use std::f64::consts::PI;

    #[test]
    fn derived_constants_match_definitions() {
        assert!((AREA - PI * RAD * RAD).abs() <= 1.0e-15);
        assert!((Z1 - PI * W1 * W1 / 0.0106).abs() <= 1.0e-12);
        assert!((Z12 - Z1 * Z1).abs() <= 1.0e-9);
        assert!((EXPR - 2.0 * PI * DR).abs() <= 1.0e-15);
        assert_eq!(AXIAL_CENTER, 4000);
    }

    #[test]
    fn radial_grid_ends_at_half_centimetre() {
        let last = (RADIAL_STEPS - 1) as f64 * DR;
        assert!((last - 0.5).abs() <= 1.0e-12);
    }
}
