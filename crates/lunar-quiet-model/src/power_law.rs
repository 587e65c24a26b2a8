//! Power-law diffraction correction.

use crate::geometry::geometric_width_with;
use crate::PhysicalConstants;

/// Width of the quiet region in degrees with a power-law diffraction term.
///
/// Evaluates `geometric_width(h) - a * nu^b`. The geometric width is the
/// behavior at infinite frequency; with `b < 0` the correction vanishes as
/// `nu` grows, and at low frequencies diffraction erodes the quiet region.
///
/// # Arguments
/// * `nu_khz` - Transmission frequency (kHz)
/// * `height_km` - Receiver height above the lunar surface (km)
/// * `a` - Amplitude coefficient, usually read from the coefficient grid
/// * `b` - Exponent coefficient, usually read from the coefficient grid
pub fn width_power_law(nu_khz: f64, height_km: f64, a: f64, b: f64) -> f64 {
    width_power_law_with(&PhysicalConstants::default(), nu_khz, height_km, a, b)
}

/// [`width_power_law`] with explicit constants.
pub fn width_power_law_with(
    constants: &PhysicalConstants,
    nu_khz: f64,
    height_km: f64,
    a: f64,
    b: f64,
) -> f64 {
    geometric_width_with(constants, height_km) - a * nu_khz.powf(b)
}
