//! Width model owning a shared coefficient grid.

use crate::estimate::estimate_width_with_offsets;
use crate::geometry::geometric_width_with;
use crate::{QueryParameters, Result, ValidationMode, WidthError, WidthEstimate, WidthModelParams};
use lunar_quiet_grid::CoefficientGrid;
use std::path::Path;
use std::sync::Arc;

/// Width model: a coefficient grid plus model parameters.
///
/// The grid is loaded once and held behind an [`Arc`]; cloning the model is
/// cheap and clones can be moved to other threads without locking.
///
/// # Example
///
/// ```no_run
/// use lunar_quiet_model::{WidthModel, WidthModelParams};
///
/// let model = WidthModel::from_path("data/coefficient_grid.json", WidthModelParams::default())?;
/// let estimate = model.estimate_width(534.0, 73.5, -85.0)?;
/// println!("{}", estimate);
/// # Ok::<(), lunar_quiet_model::WidthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WidthModel {
    grid: Arc<CoefficientGrid>,
    params: WidthModelParams,
}

impl WidthModel {
    /// Create a model from a grid. The grid's extrapolation policy is
    /// replaced by the one in `params`.
    pub fn new(grid: CoefficientGrid, params: WidthModelParams) -> Self {
        let grid = grid.with_extrapolation(params.extrapolation);
        Self {
            grid: Arc::new(grid),
            params,
        }
    }

    /// Load the grid from a file and create a model.
    pub fn from_path<P: AsRef<Path>>(path: P, params: WidthModelParams) -> Result<Self> {
        let grid = CoefficientGrid::from_path(path)?;
        Ok(Self::new(grid, params))
    }

    /// Get the coefficient grid.
    pub fn grid(&self) -> &CoefficientGrid {
        &self.grid
    }

    /// Get the model parameters.
    pub fn params(&self) -> &WidthModelParams {
        &self.params
    }

    /// Geometric width in degrees using this model's constants.
    pub fn geometric_width(&self, height_km: f64) -> f64 {
        geometric_width_with(&self.params.constants, height_km)
    }

    /// Estimate the quiet-region width.
    ///
    /// In [`ValidationMode::Strict`] a query outside the documented ranges
    /// fails with [`WidthError::Domain`]. In permissive mode it is logged and
    /// computed anyway. Numerical problems are not reported here: they show up
    /// as `NaN` fields, checked with [`WidthEstimate::validate`].
    pub fn estimate_width(
        &self,
        frequency_khz: f64,
        height_km: f64,
        threshold_db: f64,
    ) -> Result<WidthEstimate> {
        self.estimate(&QueryParameters::new(frequency_khz, height_km, threshold_db))
    }

    /// Estimate the quiet-region width for a query.
    pub fn estimate(&self, query: &QueryParameters) -> Result<WidthEstimate> {
        if let Err(violation) = query.check_domain() {
            match self.params.validation {
                ValidationMode::Strict => return Err(WidthError::Domain(violation)),
                ValidationMode::Permissive => {
                    tracing::warn!("Query outside documented range, computing anyway: {}", violation);
                }
            }
        }

        if !self.grid.bounds().contains(query.height_km, query.threshold_db) {
            tracing::warn!(
                height_km = query.height_km,
                threshold_db = query.threshold_db,
                policy = ?self.grid.extrapolation(),
                "Query outside sampled coefficient grid"
            );
        }

        let (a, b) = self.grid.coefficients(query.height_km, query.threshold_db);
        tracing::trace!(a, b, "Interpolated power-law coefficients");

        Ok(estimate_width_with_offsets(
            &self.params.constants,
            self.params.offsets,
            query.frequency_khz,
            query.height_km,
            a,
            b,
        ))
    }
}
