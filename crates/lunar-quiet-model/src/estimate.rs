//! Width estimate with asymmetric uncertainty bounds.

use crate::power_law::width_power_law_with;
use crate::{NumericalIssue, PhysicalConstants, Result, WidthError};
use lunar_quiet_grid::CoefficientGrid;
use serde::{Deserialize, Serialize};

/// Coefficient shifts used to derive the uncertainty bounds.
///
/// Lowering both `a` and `b` widens the predicted quiet region, raising them
/// narrows it. The defaults were found empirically from the simulation fits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UncertaintyOffsets {
    /// Shift applied to the amplitude `a`.
    pub a: f64,
    /// Shift applied to the exponent `b`.
    pub b: f64,
}

impl Default for UncertaintyOffsets {
    fn default() -> Self {
        Self { a: 7.0, b: 0.01 }
    }
}

/// Best estimate of the quiet-region width with plus/minus uncertainties.
///
/// All values are in degrees. After clipping, every finite field is
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthEstimate {
    /// Best-fit width (degrees).
    pub best_fit_deg: f64,
    /// Upward uncertainty (degrees).
    pub plus_deg: f64,
    /// Downward uncertainty (degrees).
    pub minus_deg: f64,
}

impl WidthEstimate {
    /// Clip an estimate so it never reports a negative width.
    ///
    /// When the best fit is negative the width is reported as zero with no
    /// downward uncertainty, and the upward uncertainty is re-measured from
    /// zero: `plus = max(0, best + plus)`. `NaN` values pass through untouched.
    pub fn clipped(best_fit_deg: f64, plus_deg: f64, minus_deg: f64) -> Self {
        if best_fit_deg < 0.0 {
            Self {
                best_fit_deg: 0.0,
                plus_deg: (best_fit_deg + plus_deg).max(0.0),
                minus_deg: 0.0,
            }
        } else {
            Self {
                best_fit_deg,
                plus_deg,
                minus_deg,
            }
        }
    }

    /// Check if every field is a finite number.
    pub fn is_valid(&self) -> bool {
        self.best_fit_deg.is_finite() && self.plus_deg.is_finite() && self.minus_deg.is_finite()
    }

    /// Return the estimate, or [`NumericalIssue::NonFiniteEstimate`] if any
    /// field is `NaN` or infinite.
    pub fn validate(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(WidthError::NumericalInvalid(NumericalIssue::NonFiniteEstimate))
        }
    }

    /// Upper end of the width range (degrees).
    pub fn upper_deg(&self) -> f64 {
        self.best_fit_deg + self.plus_deg
    }

    /// Lower end of the width range (degrees).
    pub fn lower_deg(&self) -> f64 {
        self.best_fit_deg - self.minus_deg
    }
}

impl std::fmt::Display for WidthEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2} +{:.2}/-{:.2} deg",
            self.best_fit_deg, self.plus_deg, self.minus_deg
        )
    }
}

/// Estimate the quiet-region width from a coefficient grid.
///
/// Uses the default constants and offsets. No domain checks are made and
/// invalid values propagate as `NaN`; see [`WidthEstimate::validate`].
///
/// # Arguments
/// * `grid` - Coefficient grid supplying `a(h, dB)` and `b(h, dB)`
/// * `nu_khz` - Transmission frequency (kHz)
/// * `height_km` - Receiver height above the lunar surface (km)
/// * `threshold_db` - Quiet-region intensity threshold (dB)
pub fn estimate_width_with(
    grid: &CoefficientGrid,
    nu_khz: f64,
    height_km: f64,
    threshold_db: f64,
) -> WidthEstimate {
    let (a, b) = grid.coefficients(height_km, threshold_db);
    estimate_width_with_offsets(
        &PhysicalConstants::default(),
        UncertaintyOffsets::default(),
        nu_khz,
        height_km,
        a,
        b,
    )
}

/// Estimate the width from explicit coefficients, constants and offsets.
pub fn estimate_width_with_offsets(
    constants: &PhysicalConstants,
    offsets: UncertaintyOffsets,
    nu_khz: f64,
    height_km: f64,
    a: f64,
    b: f64,
) -> WidthEstimate {
    let width = |a: f64, b: f64| width_power_law_with(constants, nu_khz, height_km, a, b);

    let best_fit = width(a, b);
    let plus = width(a - offsets.a, b - offsets.b) - best_fit;
    let minus = best_fit - width(a + offsets.a, b + offsets.b);

    WidthEstimate::clipped(best_fit, plus, minus)
}
