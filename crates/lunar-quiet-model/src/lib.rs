//! # lunar-quiet-model
//!
//! Width of the radio-quiet region on the lunar far side, as seen by a
//! receiver orbiting or sitting on the Moon.
//!
//! The estimate has two parts:
//!
//! - **Geometric shadow**: the angular width of the region hidden from the
//!   Earth's limb by the Moon, for a receiver at height `h` (diffraction-free,
//!   i.e. the infinite-frequency limit).
//! - **Diffraction correction**: an empirical power law `a * nu^b` subtracted
//!   from the geometric width. `a` and `b` come from a precomputed grid over
//!   receiver height and intensity threshold (see [`lunar_quiet_grid`]).
//!
//! Uncertainty bounds come from shifting both coefficients by fixed offsets and
//! re-evaluating the power law.
//!
//! ## Example
//!
//! ```no_run
//! use lunar_quiet_model::{geometric_width, WidthModel, WidthModelParams};
//!
//! println!("Geometric width at 73.5 km: {:.2} deg", geometric_width(73.5));
//!
//! let model = WidthModel::from_path("data/coefficient_grid.json", WidthModelParams::default())?;
//! let estimate = model.estimate_width(534.0, 73.5, -85.0)?.validate()?;
//! println!(
//!     "Width of radio quiet region = {:.2} +{:.2}/-{:.2} deg",
//!     estimate.best_fit_deg, estimate.plus_deg, estimate.minus_deg
//! );
//! # Ok::<(), lunar_quiet_model::WidthError>(())
//! ```

mod constants;
mod error;
mod estimate;
mod geometry;
mod model;
mod params;
mod power_law;

pub use constants::{PhysicalConstants, EARTH_MOON_DISTANCE_KM, EARTH_RADIUS_KM, MOON_RADIUS_KM};
pub use error::{DomainViolation, NumericalIssue, WidthError};
pub use estimate::{estimate_width_with, estimate_width_with_offsets, UncertaintyOffsets, WidthEstimate};
pub use geometry::{geometric_width, geometric_width_with, try_geometric_width, try_geometric_width_with};
pub use model::WidthModel;
pub use params::{
    QueryParameters, ValidationMode, WidthModelParams, HEIGHT_RANGE_KM, THRESHOLD_RANGE_DB,
};
pub use power_law::{width_power_law, width_power_law_with};

// Re-export the grid types callers need to build a model
pub use lunar_quiet_grid::{Coefficient, CoefficientGrid, ExtrapolationPolicy, GridBounds, GridError};

/// Result type for width model operations.
pub type Result<T> = std::result::Result<T, WidthError>;
