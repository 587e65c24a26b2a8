//! Geometric (diffraction-free) width of the quiet region.
//!
//! The Earth and Moon are modelled as circles on the Earth-Moon axis, with
//! the Moon's centre at the origin. The edge of the shadow at height `h` is
//! where the line grazing both limbs crosses the circle of radius
//! `r_moon + h`. The quiet region spans twice the angle of that crossing
//! point, seen from the Moon's centre.

use crate::{NumericalIssue, PhysicalConstants, Result, WidthError};

/// Width of the quiet region in degrees, ignoring diffraction.
///
/// This is the infinite-frequency limit of the width model. It returns `NaN`
/// when the geometry has no solution (for example a negative height); use
/// [`try_geometric_width`] to learn why.
///
/// # Arguments
/// * `height_km` - Receiver height above the lunar surface (km)
pub fn geometric_width(height_km: f64) -> f64 {
    geometric_width_with(&PhysicalConstants::default(), height_km)
}

/// [`geometric_width`] with explicit constants.
pub fn geometric_width_with(constants: &PhysicalConstants, height_km: f64) -> f64 {
    try_geometric_width_with(constants, height_km).unwrap_or(f64::NAN)
}

/// Width of the quiet region in degrees, failing when the geometry has no
/// solution.
pub fn try_geometric_width(height_km: f64) -> Result<f64> {
    try_geometric_width_with(&PhysicalConstants::default(), height_km)
}

/// [`try_geometric_width`] with explicit constants.
///
/// Solves `A x^2 + B x + C = 0` for the tangent-point abscissa `x`, with
/// `A = 1 + s^2`, `B = -2 s r_moon`, `C = r_moon^2 - (r_moon + h)^2` and
/// `s` the limb slope. The larger root is used when it is strictly positive,
/// otherwise the smaller one; if neither is positive the query fails with
/// [`NumericalIssue::NoPositiveRoot`].
pub fn try_geometric_width_with(constants: &PhysicalConstants, height_km: f64) -> Result<f64> {
    let r_moon = constants.moon_radius_km;
    let radius = r_moon + height_km;
    let slope = constants.limb_slope();

    let a = 1.0 + slope * slope;
    let b = -2.0 * slope * r_moon;
    let c = r_moon * r_moon - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant.is_nan() || discriminant < 0.0 {
        return Err(WidthError::NumericalInvalid(NumericalIssue::NegativeDiscriminant {
            discriminant,
        }));
    }

    let sqrt_disc = discriminant.sqrt();
    let root1 = (-b + sqrt_disc) / (2.0 * a);
    let root2 = (-b - sqrt_disc) / (2.0 * a);
    let x = if root1 > 0.0 {
        root1
    } else if root2 > 0.0 {
        root2
    } else {
        return Err(WidthError::NumericalInvalid(NumericalIssue::NoPositiveRoot { root1, root2 }));
    };

    let y_squared = radius * radius - x * x;
    if y_squared < 0.0 {
        return Err(WidthError::NumericalInvalid(NumericalIssue::TangentOutsideSphere {
            x,
            radius_km: radius,
        }));
    }

    let angle = (y_squared.sqrt() / x).atan();
    Ok(2.0 * angle.to_degrees())
}
