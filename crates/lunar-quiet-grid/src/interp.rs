//! Bilinear interpolation over a rectilinear grid.

use serde::{Deserialize, Serialize};

/// How an interpolant answers queries outside the sampled axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtrapolationPolicy {
    /// Evaluate at the nearest grid edge (nearest-neighbour extrapolation).
    #[default]
    Clamp,
    /// Return `NaN` for any coordinate outside the sampled axes.
    #[serde(rename = "nan")]
    NotANumber,
}

/// Continuous bivariate function `(height_km, threshold_db) -> value` over one
/// coefficient table.
///
/// Obtained from [`CoefficientGrid::interpolant`](crate::CoefficientGrid::interpolant).
#[derive(Debug, Clone, Copy)]
pub struct Interpolant<'a> {
    heights_km: &'a [f64],
    thresholds_db: &'a [f64],
    /// Row-major values, one row per height.
    values: &'a [f64],
    policy: ExtrapolationPolicy,
}

impl<'a> Interpolant<'a> {
    pub(crate) fn new(
        heights_km: &'a [f64],
        thresholds_db: &'a [f64],
        values: &'a [f64],
        policy: ExtrapolationPolicy,
    ) -> Self {
        Self {
            heights_km,
            thresholds_db,
            values,
            policy,
        }
    }

    /// Evaluate the interpolant at a height and threshold.
    ///
    /// Uses bilinear interpolation between the four surrounding samples. A
    /// query exactly on a grid node returns that sample. Outside the sampled
    /// axes the result follows the grid's [`ExtrapolationPolicy`]. A `NaN`
    /// coordinate always yields `NaN`.
    pub fn evaluate(&self, height_km: f64, threshold_db: f64) -> f64 {
        let Some((row, fy)) = locate(self.heights_km, height_km, self.policy) else {
            return f64::NAN;
        };
        let Some((col, fx)) = locate(self.thresholds_db, threshold_db, self.policy) else {
            return f64::NAN;
        };

        let v00 = self.sample(row, col);
        let v01 = self.sample(row, col + 1);
        let v10 = self.sample(row + 1, col);
        let v11 = self.sample(row + 1, col + 1);

        v00 * (1.0 - fx) * (1.0 - fy)
            + v01 * fx * (1.0 - fy)
            + v10 * (1.0 - fx) * fy
            + v11 * fx * fy
    }

    fn sample(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.thresholds_db.len() + col]
    }
}

/// Find the cell containing `x` on `axis`.
///
/// Returns the index of the lower sample and the fractional position within
/// the cell, in `[0, 1]`. `None` means the query has no defined value.
fn locate(axis: &[f64], x: f64, policy: ExtrapolationPolicy) -> Option<(usize, f64)> {
    if x.is_nan() {
        return None;
    }

    let first = axis[0];
    let last = axis[axis.len() - 1];
    let x = match policy {
        ExtrapolationPolicy::Clamp => x.clamp(first, last),
        ExtrapolationPolicy::NotANumber if x < first || x > last => return None,
        ExtrapolationPolicy::NotANumber => x,
    };

    // Number of samples <= x, minus one, kept inside the last cell
    let index = axis
        .partition_point(|&v| v <= x)
        .saturating_sub(1)
        .min(axis.len() - 2);
    let lower = axis[index];
    let upper = axis[index + 1];

    Some((index, (x - lower) / (upper - lower)))
}
