//! Lunar subsurface medium profiles.
//!
//! Each profile gives the regolith/rock density as a function of depth. The
//! electrical properties then follow from empirical lunar sample relations:
//! relative permittivity `1.919^rho` and loss tangent `10^(0.44 rho - 2.943)`,
//! with `rho` in g/cm^3.

use crate::{Result, SimError};
use serde::{Deserialize, Serialize};

/// Base of the permittivity-density relation.
const PERMITTIVITY_BASE: f64 = 1.919;

/// Slope of the log loss tangent against density.
const LOSS_TANGENT_SLOPE: f64 = 0.44;

/// Intercept of the log loss tangent against density.
const LOSS_TANGENT_INTERCEPT: f64 = -2.943;

/// Uniform bulk density of the constant profile (g/cm^3).
const DEFAULT_CONSTANT_DENSITY_G_CC: f64 = 3.34;

/// Coefficient and exponent of the continuous regolith profile, depth in cm.
const CONTINUOUS_COEFFICIENT: f64 = 1.39;
const CONTINUOUS_EXPONENT: f64 = 0.056;

const CM_PER_KM: f64 = 1e5;

/// Seismic density layers: (bottom depth in km, density in g/cm^3).
const DEFAULT_DENSITY_STEPS: [(f64, f64); 7] = [
    (1.0, 1.92),
    (15.0, 2.7),
    (40.0, 2.8),
    (238.0, 3.3),
    (1407.1, 3.4),
    (1497.1, 5.1),
    (f64::INFINITY, 8.0),
];

/// Point in the simulation plane, relative to the Moon's centre (km).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Coordinate along the propagation axis (km).
    pub x_km: f64,
    /// Coordinate across the propagation axis (km).
    pub y_km: f64,
}

impl Position {
    /// Create a new position.
    pub fn new(x_km: f64, y_km: f64) -> Self {
        Self { x_km, y_km }
    }

    /// Depth below the surface of a body of the given radius, clamped at zero.
    ///
    /// A `NaN` coordinate or radius gives a `NaN` depth.
    pub fn depth_km(&self, radius_km: f64) -> f64 {
        let depth_km = radius_km - self.x_km.hypot(self.y_km);
        if depth_km.is_nan() {
            return f64::NAN;
        }
        depth_km.max(0.0)
    }
}

/// One layer of a stepped density profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityStep {
    /// Depth of the bottom of this layer (km); the layer covers depths below it.
    pub max_depth_km: f64,
    /// Density within the layer (g/cm^3).
    pub density_g_cc: f64,
}

/// Electrical properties of the medium at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediumProperties {
    /// Density (g/cm^3).
    pub density_g_cc: f64,
    /// Relative permittivity.
    pub permittivity: f64,
    /// Loss tangent.
    pub loss_tangent: f64,
    /// Electric conductivity in solver units, `2 pi f * loss_tangent`.
    pub conductivity: f64,
}

impl MediumProperties {
    /// Derive electrical properties from a density at a solver-unit frequency.
    pub fn from_density(density_g_cc: f64, simulation_frequency: f64) -> Self {
        let permittivity = PERMITTIVITY_BASE.powf(density_g_cc);
        let loss_tangent = 10f64.powf(LOSS_TANGENT_SLOPE * density_g_cc + LOSS_TANGENT_INTERCEPT);
        Self {
            density_g_cc,
            permittivity,
            loss_tangent,
            conductivity: 2.0 * std::f64::consts::PI * simulation_frequency * loss_tangent,
        }
    }
}

/// Density model of the lunar interior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediumProfile {
    /// Uniform density throughout.
    Constant {
        /// Bulk density (g/cm^3).
        density_g_cc: f64,
    },
    /// Compacting regolith, `rho = 1.39 z^0.056` with depth `z` in cm.
    Continuous,
    /// Layered density from seismic measurements.
    Stepped {
        /// Layers ordered by increasing depth.
        steps: Vec<DensityStep>,
    },
}

impl Default for MediumProfile {
    fn default() -> Self {
        MediumProfile::Constant {
            density_g_cc: DEFAULT_CONSTANT_DENSITY_G_CC,
        }
    }
}

impl MediumProfile {
    /// Build a stepped profile, checking the layer table.
    pub fn stepped(steps: Vec<DensityStep>) -> Result<Self> {
        let profile = MediumProfile::Stepped { steps };
        profile.validate()?;
        Ok(profile)
    }

    /// Stepped profile with the default seismic layers.
    pub fn stepped_default() -> Self {
        MediumProfile::Stepped {
            steps: DEFAULT_DENSITY_STEPS
                .iter()
                .map(|&(max_depth_km, density_g_cc)| DensityStep {
                    max_depth_km,
                    density_g_cc,
                })
                .collect(),
        }
    }

    /// Check the profile's parameters.
    pub fn validate(&self) -> Result<()> {
        match self {
            MediumProfile::Constant { density_g_cc } => {
                if !(density_g_cc.is_finite() && *density_g_cc > 0.0) {
                    return Err(SimError::InvalidConfig(format!(
                        "constant density must be positive, got {}",
                        density_g_cc
                    )));
                }
            }
            MediumProfile::Continuous => {}
            MediumProfile::Stepped { steps } => {
                if steps.is_empty() {
                    return Err(SimError::InvalidStepTable("no layers".to_string()));
                }
                for (i, step) in steps.iter().enumerate() {
                    if step.max_depth_km.is_nan() {
                        return Err(SimError::InvalidStepTable(format!("layer {} depth is NaN", i)));
                    }
                    if !(step.density_g_cc.is_finite() && step.density_g_cc > 0.0) {
                        return Err(SimError::InvalidStepTable(format!(
                            "layer {} density must be positive, got {}",
                            i, step.density_g_cc
                        )));
                    }
                }
                if let Some(i) = steps.windows(2).position(|w| w[0].max_depth_km >= w[1].max_depth_km) {
                    return Err(SimError::InvalidStepTable(format!(
                        "layer {} depth {} is not below layer {} depth {}",
                        i + 1,
                        steps[i + 1].max_depth_km,
                        i,
                        steps[i].max_depth_km
                    )));
                }
            }
        }
        Ok(())
    }

    /// Density at a position (g/cm^3).
    ///
    /// Points outside the body have depth zero. For a stepped profile a depth
    /// below the last layer takes the last layer's density. A `NaN` position
    /// gives `NaN` for every profile.
    pub fn density_at(&self, position: Position, moon_radius_km: f64) -> f64 {
        let depth_km = position.depth_km(moon_radius_km);
        if depth_km.is_nan() {
            return f64::NAN;
        }
        match self {
            MediumProfile::Constant { density_g_cc } => *density_g_cc,
            MediumProfile::Continuous => {
                CONTINUOUS_COEFFICIENT * (depth_km * CM_PER_KM).powf(CONTINUOUS_EXPONENT)
            }
            MediumProfile::Stepped { steps } => steps
                .iter()
                .find(|step| depth_km < step.max_depth_km)
                .or_else(|| steps.last())
                .map_or(f64::NAN, |step| step.density_g_cc),
        }
    }

    /// Electrical properties at a position for a solver-unit frequency.
    pub fn properties_at(
        &self,
        position: Position,
        moon_radius_km: f64,
        simulation_frequency: f64,
    ) -> MediumProperties {
        MediumProperties::from_density(self.density_at(position, moon_radius_km), simulation_frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RADIUS: f64 = 1737.0;

    fn at_depth(depth_km: f64) -> Position {
        Position::new(0.0, RADIUS - depth_km)
    }

    #[test]
    fn test_depth() {
        assert_eq!(Position::new(0.0, 0.0).depth_km(RADIUS), RADIUS);
        assert_relative_eq!(Position::new(300.0, 400.0).depth_km(RADIUS), RADIUS - 500.0);
        assert_eq!(Position::new(2000.0, 0.0).depth_km(RADIUS), 0.0);
    }

    #[test]
    fn test_constant_profile() {
        let profile = MediumProfile::default();
        assert_eq!(profile.density_at(at_depth(10.0), RADIUS), 3.34);
        assert_eq!(profile.density_at(at_depth(1500.0), RADIUS), 3.34);
    }

    #[test]
    fn test_continuous_profile() {
        let profile = MediumProfile::Continuous;
        // 1 km = 1e5 cm
        let expected = 1.39 * 1e5f64.powf(0.056);
        assert_relative_eq!(profile.density_at(at_depth(1.0), RADIUS), expected, epsilon = 1e-12);
        // Surface and outside the body
        assert_eq!(profile.density_at(at_depth(0.0), RADIUS), 0.0);
        assert_eq!(profile.density_at(Position::new(1900.0, 0.0), RADIUS), 0.0);

        // Density increases with depth
        let shallow = profile.density_at(at_depth(0.5), RADIUS);
        let deep = profile.density_at(at_depth(100.0), RADIUS);
        assert!(deep > shallow);
    }

    #[test]
    fn test_stepped_profile_layers() {
        let profile = MediumProfile::stepped_default();
        assert_eq!(profile.density_at(at_depth(0.5), RADIUS), 1.92);
        assert_eq!(profile.density_at(at_depth(1.0), RADIUS), 2.7); // Layer boundary
        assert_eq!(profile.density_at(at_depth(20.0), RADIUS), 2.8);
        assert_eq!(profile.density_at(at_depth(100.0), RADIUS), 3.3);
        assert_eq!(profile.density_at(at_depth(1000.0), RADIUS), 3.4);
        assert_eq!(profile.density_at(at_depth(1450.0), RADIUS), 5.1);
        assert_eq!(profile.density_at(Position::new(0.0, 0.0), RADIUS), 8.0);
    }

    #[test]
    fn test_stepped_profile_falls_back_to_last_layer() {
        let profile = MediumProfile::stepped(vec![
            DensityStep { max_depth_km: 10.0, density_g_cc: 2.0 },
            DensityStep { max_depth_km: 20.0, density_g_cc: 3.0 },
        ])
        .expect("Should build stepped profile");
        assert_eq!(profile.density_at(at_depth(500.0), RADIUS), 3.0);
    }

    #[test]
    fn test_stepped_validation() {
        assert!(matches!(MediumProfile::stepped(vec![]), Err(SimError::InvalidStepTable(_))));

        let unsorted = vec![
            DensityStep { max_depth_km: 20.0, density_g_cc: 2.0 },
            DensityStep { max_depth_km: 10.0, density_g_cc: 3.0 },
        ];
        assert!(matches!(MediumProfile::stepped(unsorted), Err(SimError::InvalidStepTable(_))));

        assert!(MediumProfile::stepped_default().validate().is_ok());
    }

    #[test]
    fn test_nan_position_is_not_masked() {
        let position = Position::new(f64::NAN, 0.0);
        assert!(position.depth_km(RADIUS).is_nan());
        assert!(Position::new(0.0, 0.0).depth_km(f64::NAN).is_nan());

        for profile in [
            MediumProfile::default(),
            MediumProfile::Continuous,
            MediumProfile::stepped_default(),
        ] {
            assert!(profile.density_at(position, RADIUS).is_nan(), "{:?}", profile);
            let props = profile.properties_at(position, RADIUS, 1.0 / 30.0);
            assert!(props.permittivity.is_nan() && props.conductivity.is_nan());
        }
    }

    #[test]
    fn test_stepped_rejects_nan_depth_in_any_layer() {
        let last_nan = vec![
            DensityStep { max_depth_km: 10.0, density_g_cc: 2.0 },
            DensityStep { max_depth_km: f64::NAN, density_g_cc: 3.0 },
        ];
        assert!(matches!(MediumProfile::stepped(last_nan), Err(SimError::InvalidStepTable(_))));

        let single_nan = vec![DensityStep { max_depth_km: f64::NAN, density_g_cc: 3.0 }];
        assert!(matches!(MediumProfile::stepped(single_nan), Err(SimError::InvalidStepTable(_))));
    }

    #[test]
    fn test_stepped_rejects_bad_density() {
        for density_g_cc in [-2.0, 0.0, f64::NAN, f64::INFINITY] {
            let steps = vec![
                DensityStep { max_depth_km: 10.0, density_g_cc: 2.0 },
                DensityStep { max_depth_km: 20.0, density_g_cc },
            ];
            assert!(
                matches!(MediumProfile::stepped(steps), Err(SimError::InvalidStepTable(_))),
                "density {} accepted",
                density_g_cc
            );
        }
    }

    #[test]
    fn test_constant_validation() {
        let profile = MediumProfile::Constant { density_g_cc: -1.0 };
        assert!(matches!(profile.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_electrical_properties() {
        let freq = 1.0 / 30.0;
        let props = MediumProperties::from_density(3.34, freq);
        assert_relative_eq!(props.permittivity, 1.919f64.powf(3.34), epsilon = 1e-12);
        assert_relative_eq!(props.loss_tangent, 10f64.powf(0.44 * 3.34 - 2.943), epsilon = 1e-12);
        assert_relative_eq!(
            props.conductivity,
            2.0 * std::f64::consts::PI * freq * props.loss_tangent,
            epsilon = 1e-15
        );

        // Zero density is vacuum-like permittivity
        let vacuum = MediumProperties::from_density(0.0, freq);
        assert_eq!(vacuum.permittivity, 1.0);
    }

    #[test]
    fn test_profile_serde_tags() {
        let yaml = "type: constant\ndensity_g_cc: 3.0\n";
        let profile: MediumProfile = serde_yaml::from_str(yaml).expect("Should parse constant");
        assert_eq!(profile, MediumProfile::Constant { density_g_cc: 3.0 });

        let profile: MediumProfile = serde_yaml::from_str("type: continuous\n").expect("Should parse continuous");
        assert_eq!(profile, MediumProfile::Continuous);
    }
}
