//! FDTD run configuration.

use crate::{MediumProfile, Result, SimError};
use serde::{Deserialize, Serialize};

/// Speed of light used for the solver unit conversion (m/s).
///
/// Rounded to `3e8` so 10 kHz at a 1 km scale is exactly `1/30`, as in the
/// reference runs.
pub const SPEED_OF_LIGHT_M_S: f64 = 3.0e8;

/// Speed of light in vacuum (m/s).
pub const EXACT_SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Parameters of one 2D diffraction run.
///
/// Lengths are in km and are converted to solver units by dividing by
/// `length_scale_km`. The Moon sits at the origin; a plane-wave line source
/// at `source_x_km` illuminates it, and absorbing layers of thickness
/// `pml_thickness_km` line the cell walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Source frequency (kHz).
    pub frequency_khz: f64,
    /// Length of one solver unit (km).
    pub length_scale_km: f64,
    /// Cell size along and across the propagation axis (km).
    pub cell_size_km: (f64, f64),
    /// Radius of the Moon in the cell (km).
    pub moon_radius_km: f64,
    /// Position of the line source on the propagation axis (km).
    pub source_x_km: f64,
    /// Extent of the line source across the propagation axis (km).
    pub source_span_km: f64,
    /// Thickness of the absorbing boundary layer (km).
    pub pml_thickness_km: f64,
    /// Grid points per solver unit.
    pub resolution: f64,
    /// Total run time (solver time units).
    pub run_until: f64,
    /// Number of power snapshots over the final wave period.
    pub samples_per_period: usize,
    /// Lunar interior, or `None` for the free-space reference run.
    pub medium: Option<MediumProfile>,
    /// Speed of light for unit conversion (m/s).
    pub speed_of_light_m_s: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frequency_khz: 10.0,
            length_scale_km: 1.0,
            cell_size_km: (4000.0, 4000.0),
            moon_radius_km: 1737.0,
            source_x_km: -1900.0,
            source_span_km: 4000.0,
            pml_thickness_km: 100.0,
            resolution: 1.0,
            run_until: 20000.0,
            samples_per_period: 10,
            medium: Some(MediumProfile::default()),
            speed_of_light_m_s: SPEED_OF_LIGHT_M_S,
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from YAML text. Missing fields take their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Same run without the Moon, used to normalise intensities.
    pub fn free_space(&self) -> Self {
        Self {
            medium: None,
            ..self.clone()
        }
    }

    /// Source frequency in solver units, `f * a / c` for unit length `a`.
    pub fn simulation_frequency(&self) -> f64 {
        self.frequency_khz * 1e3 * self.length_scale_km * 1e3 / self.speed_of_light_m_s
    }

    /// Free-space wavelength (km).
    pub fn wavelength_km(&self) -> f64 {
        self.speed_of_light_m_s / (self.frequency_khz * 1e3) / 1e3
    }

    /// One wave period in solver time units.
    pub fn period(&self) -> f64 {
        1.0 / self.simulation_frequency()
    }

    /// Times at which total power is recorded.
    ///
    /// `samples_per_period` evenly spaced times over the last wave period,
    /// ending at `run_until`, for averaging out the oscillation. Empty when
    /// `samples_per_period` is zero, which [`validate`](Self::validate) rejects.
    pub fn output_times(&self) -> Vec<f64> {
        let n = self.samples_per_period;
        if n == 0 {
            return Vec::new();
        }
        let step = self.period() / n as f64;
        (0..n)
            .map(|i| self.run_until - (n - 1 - i) as f64 * step)
            .collect()
    }

    /// Number of grid points along each cell axis.
    pub fn grid_points(&self) -> (usize, usize) {
        let points = |extent_km: f64| {
            (extent_km / self.length_scale_km * self.resolution).round() as usize
        };
        (points(self.cell_size_km.0), points(self.cell_size_km.1))
    }

    /// Check the configuration for physical and geometric consistency.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("frequency_khz", self.frequency_khz),
            ("length_scale_km", self.length_scale_km),
            ("cell_size_km.0", self.cell_size_km.0),
            ("cell_size_km.1", self.cell_size_km.1),
            ("moon_radius_km", self.moon_radius_km),
            ("source_span_km", self.source_span_km),
            ("resolution", self.resolution),
            ("run_until", self.run_until),
            ("speed_of_light_m_s", self.speed_of_light_m_s),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidConfig(format!("{} must be positive, got {}", name, value)));
            }
        }

        if !(self.pml_thickness_km.is_finite() && self.pml_thickness_km >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "pml_thickness_km must be non-negative, got {}",
                self.pml_thickness_km
            )));
        }

        if self.samples_per_period == 0 {
            return Err(SimError::InvalidConfig("samples_per_period must be at least 1".to_string()));
        }

        if self.run_until < self.period() {
            return Err(SimError::InvalidConfig(format!(
                "run_until {} is shorter than one wave period {}",
                self.run_until,
                self.period()
            )));
        }

        // Interior half-widths, excluding the absorbing layers
        let half_x = self.cell_size_km.0 / 2.0 - self.pml_thickness_km;
        let half_y = self.cell_size_km.1 / 2.0 - self.pml_thickness_km;

        if self.source_x_km.abs() > half_x {
            return Err(SimError::InvalidConfig(format!(
                "source at x = {} km lies outside the interior half-width {} km",
                self.source_x_km, half_x
            )));
        }

        if self.source_span_km > self.cell_size_km.1 {
            return Err(SimError::InvalidConfig(format!(
                "source span {} km exceeds cell height {} km",
                self.source_span_km, self.cell_size_km.1
            )));
        }

        if let Some(medium) = &self.medium {
            if self.moon_radius_km > half_x.min(half_y) {
                return Err(SimError::InvalidConfig(format!(
                    "moon radius {} km does not fit inside the cell interior",
                    self.moon_radius_km
                )));
            }
            if self.source_x_km.abs() <= self.moon_radius_km {
                return Err(SimError::InvalidConfig(format!(
                    "source at x = {} km lies inside the moon",
                    self.source_x_km
                )));
            }
            medium.validate()?;
        }

        tracing::debug!(
            frequency_khz = self.frequency_khz,
            grid = ?self.grid_points(),
            with_moon = self.medium.is_some(),
            "Simulation config validated"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.free_space().validate().is_ok());
    }

    #[test]
    fn test_simulation_frequency_10_khz() {
        let config = SimulationConfig::default();
        // 10 kHz has a 30 km wavelength, so 1/30 at a 1 km scale
        assert_eq!(config.simulation_frequency(), 1.0 / 30.0);
        assert_relative_eq!(config.wavelength_km(), 30.0, epsilon = 1e-12);
        assert_relative_eq!(config.period(), 30.0, epsilon = 1e-12);
        assert_relative_eq!(config.period() * config.simulation_frequency(), 1.0);
    }

    #[test]
    fn test_exact_speed_of_light() {
        let config = SimulationConfig {
            speed_of_light_m_s: EXACT_SPEED_OF_LIGHT_M_S,
            ..SimulationConfig::default()
        };
        assert_relative_eq!(config.simulation_frequency(), 0.033_356_409_519_815_2, epsilon = 1e-15);
        assert_relative_eq!(config.wavelength_km(), 29.979_245_8, epsilon = 1e-9);
        assert_relative_eq!(config.output_times()[0], 20000.0 - 0.9 * 29.979_245_8, epsilon = 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_length_scale_changes_units() {
        let config = SimulationConfig {
            length_scale_km: 2.0,
            ..SimulationConfig::default()
        };
        let base = SimulationConfig::default();
        assert_relative_eq!(config.simulation_frequency(), 2.0 * base.simulation_frequency());
        assert_eq!(config.grid_points(), (2000, 2000));
        assert_eq!(base.grid_points(), (4000, 4000));
    }

    #[test]
    fn test_output_times_span_last_period() {
        let config = SimulationConfig::default();
        let times = config.output_times();

        assert_eq!(times.len(), 10);
        assert_eq!(times[9], 20000.0);
        for pair in times.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], config.period() / 10.0, epsilon = 1e-6);
        }
        assert_relative_eq!(times[0], 19973.0, epsilon = 1e-9);
        assert_relative_eq!(times[1], 19976.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_sample() {
        let config = SimulationConfig {
            samples_per_period: 1,
            ..SimulationConfig::default()
        };
        assert_eq!(config.output_times(), vec![20000.0]);
    }

    #[test]
    fn test_zero_samples_gives_no_times() {
        let config = SimulationConfig {
            samples_per_period: 0,
            ..SimulationConfig::default()
        };
        assert!(config.output_times().is_empty());
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_free_space_drops_medium() {
        let config = SimulationConfig::default();
        let free = config.free_space();
        assert!(free.medium.is_none());
        assert_eq!(free.frequency_khz, config.frequency_khz);
        assert_eq!(free.output_times(), config.output_times());
    }

    #[test]
    fn test_validation_errors() {
        let base = SimulationConfig::default();

        let cases = [
            SimulationConfig { frequency_khz: 0.0, ..base.clone() },
            SimulationConfig { resolution: -1.0, ..base.clone() },
            SimulationConfig { run_until: f64::NAN, ..base.clone() },
            SimulationConfig { run_until: 10.0, ..base.clone() },
            SimulationConfig { samples_per_period: 0, ..base.clone() },
            SimulationConfig { pml_thickness_km: -5.0, ..base.clone() },
            SimulationConfig { source_x_km: -1950.0, ..base.clone() },
            SimulationConfig { source_x_km: -1000.0, ..base.clone() },
            SimulationConfig { source_span_km: 5000.0, ..base.clone() },
            SimulationConfig { moon_radius_km: 1950.0, ..base.clone() },
            SimulationConfig { speed_of_light_m_s: 0.0, ..base.clone() },
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(SimError::InvalidConfig(_))),
                "expected invalid config: {:?}",
                config
            );
        }
    }

    #[test]
    fn test_free_space_ignores_moon_checks() {
        let config = SimulationConfig {
            source_x_km: -1000.0,
            medium: None,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_medium_rejected() {
        let config = SimulationConfig {
            medium: Some(MediumProfile::Stepped { steps: vec![] }),
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidStepTable(_))));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "
frequency_khz: 20.0
medium:
  type: continuous
";
        let config = SimulationConfig::from_yaml_str(yaml).expect("Should parse config");
        assert_eq!(config.frequency_khz, 20.0);
        assert_eq!(config.medium, Some(MediumProfile::Continuous));
        assert_eq!(config.cell_size_km, (4000.0, 4000.0));

        let free = SimulationConfig::from_yaml_str("medium: null\n").expect("Should parse config");
        assert!(free.medium.is_none());

        assert!(matches!(
            SimulationConfig::from_yaml_str("frequency: 20.0\n"),
            Err(SimError::Yaml(_))
        ));
    }
}
