//! Coefficient grid representation and loading.

use crate::interp::{ExtrapolationPolicy, Interpolant};
use crate::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which power-law coefficient to read from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coefficient {
    /// Amplitude `a` of the correction `a * nu^b`.
    A,
    /// Exponent `b` of the correction `a * nu^b`.
    B,
}

impl Coefficient {
    fn table_name(self) -> &'static str {
        match self {
            Coefficient::A => "a_grid",
            Coefficient::B => "b_grid",
        }
    }
}

/// Sampled domain of a coefficient grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    /// Lowest sampled height (km).
    pub min_height_km: f64,
    /// Highest sampled height (km).
    pub max_height_km: f64,
    /// Lowest sampled threshold (dB).
    pub min_threshold_db: f64,
    /// Highest sampled threshold (dB).
    pub max_threshold_db: f64,
}

impl GridBounds {
    /// Check if a query lies within the sampled domain (edges included).
    pub fn contains(&self, height_km: f64, threshold_db: f64) -> bool {
        height_km >= self.min_height_km
            && height_km <= self.max_height_km
            && threshold_db >= self.min_threshold_db
            && threshold_db <= self.max_threshold_db
    }
}

/// On-disk layout of a grid, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGrid {
    heights_km: Vec<f64>,
    thresholds_db: Vec<f64>,
    #[serde(alias = "a_grid_interp")]
    a_grid: Vec<Vec<f64>>,
    #[serde(alias = "b_grid_interp")]
    b_grid: Vec<Vec<f64>>,
}

/// Grid of power-law coefficients `a(h, dB)` and `b(h, dB)`.
///
/// The grid is rectilinear: samples sit on the cross product of a height axis
/// and a threshold axis, both strictly increasing but not necessarily evenly
/// spaced. It is immutable once built and can be shared freely across threads.
#[derive(Debug, Clone, Serialize)]
#[serde(into = "RawGrid")]
pub struct CoefficientGrid {
    /// Height samples (km), strictly increasing.
    heights_km: Vec<f64>,
    /// Threshold samples (dB), strictly increasing.
    thresholds_db: Vec<f64>,
    /// `a` values in row-major order (one row per height).
    a: Vec<f64>,
    /// `b` values in row-major order (one row per height).
    b: Vec<f64>,
    /// Behavior for queries outside the sampled axes.
    extrapolation: ExtrapolationPolicy,
}

impl CoefficientGrid {
    /// Build a grid from axes and value tables.
    ///
    /// `a_grid[i][j]` and `b_grid[i][j]` are the coefficients at
    /// `heights_km[i]`, `thresholds_db[j]`.
    pub fn new(
        heights_km: Vec<f64>,
        thresholds_db: Vec<f64>,
        a_grid: Vec<Vec<f64>>,
        b_grid: Vec<Vec<f64>>,
    ) -> Result<Self> {
        check_axis("heights_km", &heights_km)?;
        check_axis("thresholds_db", &thresholds_db)?;

        let rows = heights_km.len();
        let cols = thresholds_db.len();
        let a = flatten_table(Coefficient::A.table_name(), a_grid, rows, cols)?;
        let b = flatten_table(Coefficient::B.table_name(), b_grid, rows, cols)?;

        Ok(Self {
            heights_km,
            thresholds_db,
            a,
            b,
            extrapolation: ExtrapolationPolicy::default(),
        })
    }

    /// Load a grid from a file, choosing the format by extension.
    ///
    /// `.json` files are read with serde_json, `.yaml`/`.yml` with serde_yaml.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());

        let text = match extension.as_deref() {
            Some("json") | Some("yaml") | Some("yml") => std::fs::read_to_string(path)?,
            _ => return Err(GridError::UnsupportedFormat(path.display().to_string())),
        };

        let grid = if extension.as_deref() == Some("json") {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };

        let bounds = grid.bounds();
        tracing::debug!(
            path = %path.display(),
            heights = grid.heights_km.len(),
            thresholds = grid.thresholds_db.len(),
            "Loaded coefficient grid covering h {:.1}-{:.1} km, dB {:.1}-{:.1}",
            bounds.min_height_km,
            bounds.max_height_km,
            bounds.min_threshold_db,
            bounds.max_threshold_db,
        );

        Ok(grid)
    }

    /// Parse a grid from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawGrid = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Parse a grid from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let raw: RawGrid = serde_yaml::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawGrid) -> Result<Self> {
        Self::new(raw.heights_km, raw.thresholds_db, raw.a_grid, raw.b_grid)
    }

    /// Return this grid with a different extrapolation policy.
    pub fn with_extrapolation(mut self, policy: ExtrapolationPolicy) -> Self {
        self.extrapolation = policy;
        self
    }

    /// Get the extrapolation policy used by this grid's interpolants.
    pub fn extrapolation(&self) -> ExtrapolationPolicy {
        self.extrapolation
    }

    /// Continuous interpolant for one coefficient.
    pub fn interpolant(&self, coefficient: Coefficient) -> Interpolant<'_> {
        let values = match coefficient {
            Coefficient::A => &self.a,
            Coefficient::B => &self.b,
        };
        Interpolant::new(&self.heights_km, &self.thresholds_db, values, self.extrapolation)
    }

    /// Interpolants for `a` and `b`, in that order.
    pub fn interpolants(&self) -> (Interpolant<'_>, Interpolant<'_>) {
        (self.interpolant(Coefficient::A), self.interpolant(Coefficient::B))
    }

    /// Interpolated `(a, b)` pair at a height and threshold.
    pub fn coefficients(&self, height_km: f64, threshold_db: f64) -> (f64, f64) {
        let a = self.interpolant(Coefficient::A).evaluate(height_km, threshold_db);
        let b = self.interpolant(Coefficient::B).evaluate(height_km, threshold_db);
        (a, b)
    }

    /// Get the sampled domain of this grid.
    pub fn bounds(&self) -> GridBounds {
        // Axes are validated to hold at least two samples.
        GridBounds {
            min_height_km: self.heights_km[0],
            max_height_km: self.heights_km[self.heights_km.len() - 1],
            min_threshold_db: self.thresholds_db[0],
            max_threshold_db: self.thresholds_db[self.thresholds_db.len() - 1],
        }
    }

    /// Height axis (km).
    pub fn heights_km(&self) -> &[f64] {
        &self.heights_km
    }

    /// Threshold axis (dB).
    pub fn thresholds_db(&self) -> &[f64] {
        &self.thresholds_db
    }

    /// Get the dimensions of this grid as (heights, thresholds).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.heights_km.len(), self.thresholds_db.len())
    }
}

impl From<CoefficientGrid> for RawGrid {
    fn from(grid: CoefficientGrid) -> Self {
        let cols = grid.thresholds_db.len();
        let unflatten = |values: &[f64]| values.chunks(cols).map(<[f64]>::to_vec).collect();
        RawGrid {
            a_grid: unflatten(&grid.a),
            b_grid: unflatten(&grid.b),
            heights_km: grid.heights_km,
            thresholds_db: grid.thresholds_db,
        }
    }
}

/// Check that an axis has at least two finite, strictly increasing samples.
fn check_axis(axis: &'static str, values: &[f64]) -> Result<()> {
    if values.len() < 2 {
        return Err(GridError::AxisTooShort {
            axis,
            len: values.len(),
        });
    }

    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(GridError::AxisNotIncreasing { axis, index });
    }

    if let Some(index) = values.windows(2).position(|w| w[0] >= w[1]) {
        return Err(GridError::AxisNotIncreasing {
            axis,
            index: index + 1,
        });
    }

    Ok(())
}

/// Flatten a nested table into row-major order, checking shape and values.
fn flatten_table(
    table: &'static str,
    rows: Vec<Vec<f64>>,
    expected_rows: usize,
    expected_cols: usize,
) -> Result<Vec<f64>> {
    if rows.len() != expected_rows {
        return Err(GridError::ShapeMismatch {
            table,
            expected_rows,
            expected_cols,
            detail: format!("found {} rows", rows.len()),
        });
    }

    let mut flat = Vec::with_capacity(expected_rows * expected_cols);
    for (row, values) in rows.into_iter().enumerate() {
        if values.len() != expected_cols {
            return Err(GridError::ShapeMismatch {
                table,
                expected_rows,
                expected_cols,
                detail: format!("row {} has {} columns", row, values.len()),
            });
        }
        if let Some(col) = values.iter().position(|v| !v.is_finite()) {
            return Err(GridError::NonFiniteValue { table, row, col });
        }
        flat.extend(values);
    }

    Ok(flat)
}
