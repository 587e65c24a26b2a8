//! Earth-Moon geometry constants.

use serde::{Deserialize, Serialize};

/// Mean radius of the Moon (km).
pub const MOON_RADIUS_KM: f64 = 1737.1;

/// Mean radius of the Earth (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Mean Earth-Moon distance (km).
pub const EARTH_MOON_DISTANCE_KM: f64 = 384400.0;

/// Radii and separation used by the geometric shadow model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhysicalConstants {
    /// Radius of the occulting body (km).
    pub moon_radius_km: f64,
    /// Radius of the transmitting body (km).
    pub earth_radius_km: f64,
    /// Centre-to-centre distance between the two bodies (km).
    pub earth_moon_distance_km: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            moon_radius_km: MOON_RADIUS_KM,
            earth_radius_km: EARTH_RADIUS_KM,
            earth_moon_distance_km: EARTH_MOON_DISTANCE_KM,
        }
    }
}

impl PhysicalConstants {
    /// Slope of the line tangent to both limbs, relative to the Earth-Moon axis.
    pub fn limb_slope(&self) -> f64 {
        (self.earth_radius_km - self.moon_radius_km) / self.earth_moon_distance_km
    }
}
