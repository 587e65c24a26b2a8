//! # lunar-quiet-grid
//!
//! Precomputed power-law coefficient grid for the lunar radio-quiet width model.
//!
//! The diffraction correction applied to the geometric shadow width is an
//! empirical power law `a * nu^b`. The coefficients `a` and `b` were fitted to
//! FDTD simulations of radio waves diffracting around the Moon, over a grid of
//! receiver heights (km) and intensity thresholds (dB). This crate loads that
//! grid and exposes each coefficient as a continuous bivariate function.
//!
//! ## Grid Format
//!
//! Grids are stored as JSON or YAML with two strictly increasing axes and one
//! value table per coefficient, row-major by height:
//!
//! ```json
//! {
//!   "heights_km": [0.0, 50.0, 100.0, 150.0],
//!   "thresholds_db": [-90.0, -70.0, -50.0],
//!   "a_grid": [[...], [...], [...], [...]],
//!   "b_grid": [[...], [...], [...], [...]]
//! }
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use lunar_quiet_grid::{Coefficient, CoefficientGrid};
//!
//! let grid = CoefficientGrid::from_path("data/coefficient_grid.json")?;
//!
//! let a = grid.interpolant(Coefficient::A).evaluate(73.5, -85.0);
//! let (a_again, b) = grid.coefficients(73.5, -85.0);
//! assert_eq!(a, a_again);
//! println!("a = {a}, b = {b}");
//! # Ok::<(), lunar_quiet_grid::GridError>(())
//! ```

mod error;
mod grid;
mod interp;

pub use error::GridError;
pub use grid::{Coefficient, CoefficientGrid, GridBounds};
pub use interp::{ExtrapolationPolicy, Interpolant};

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
