//! # lunar-quiet-sim
//!
//! Description of the FDTD runs behind the coefficient grid.
//!
//! The diffraction fits were produced by simulating a plane wave passing a
//! 2D lunar cross-section, once with the Moon in place and once in free space,
//! and comparing time-averaged power. This crate does not run a field solver;
//! it describes a run:
//!
//! - [`SimulationConfig`] holds the cell, source, boundary and timing
//!   parameters, and derives the solver-unit frequency and output times.
//! - [`MediumProfile`] selects one of the lunar density models and maps a
//!   position inside the Moon to permittivity and conductivity.
//! - [`relative_intensity_db`] combines the paired runs into the intensity
//!   ratio thresholded by the quiet-region model.
//!
//! ## Example
//!
//! ```
//! use lunar_quiet_sim::{MediumProfile, Position, SimulationConfig};
//!
//! let config = SimulationConfig::default();
//! config.validate()?;
//!
//! let freq = config.simulation_frequency();
//! let medium = MediumProfile::stepped_default();
//! let props = medium.properties_at(Position::new(0.0, 1000.0), config.moon_radius_km, freq);
//! assert!(props.permittivity > 1.0);
//! # Ok::<(), lunar_quiet_sim::SimError>(())
//! ```

mod config;
mod error;
mod medium;

pub use config::{SimulationConfig, EXACT_SPEED_OF_LIGHT_M_S, SPEED_OF_LIGHT_M_S};
pub use error::SimError;
pub use medium::{DensityStep, MediumProfile, MediumProperties, Position};

/// Result type for simulation setup operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Relative intensity in dB between a run with the Moon and a free-space run.
///
/// Computes `10 * log10(with_moon / free_space)`. Non-positive inputs give
/// `NaN` or an infinity, which is passed back unmasked.
pub fn relative_intensity_db(with_moon: f64, free_space: f64) -> f64 {
    10.0 * (with_moon / free_space).log10()
}
