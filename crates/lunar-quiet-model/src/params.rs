//! Query and model parameters.

use crate::{DomainViolation, PhysicalConstants, Result, UncertaintyOffsets, WidthError};
use lunar_quiet_grid::ExtrapolationPolicy;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

/// Receiver heights covered by the diffraction fits (km).
pub const HEIGHT_RANGE_KM: RangeInclusive<f64> = 0.0..=150.0;

/// Intensity thresholds covered by the diffraction fits (dB).
pub const THRESHOLD_RANGE_DB: RangeInclusive<f64> = -90.0..=-50.0;

// ============================================================================
// Query Parameters
// ============================================================================

/// A single width query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryParameters {
    /// Transmission frequency (kHz).
    pub frequency_khz: f64,
    /// Receiver height above the lunar surface (km).
    pub height_km: f64,
    /// Quiet-region intensity threshold (dB).
    pub threshold_db: f64,
}

impl QueryParameters {
    /// Create a new query.
    pub fn new(frequency_khz: f64, height_km: f64, threshold_db: f64) -> Self {
        Self {
            frequency_khz,
            height_km,
            threshold_db,
        }
    }

    /// Check the query against the documented physical ranges.
    ///
    /// Returns the first violation found. Frequency is only required to be a
    /// positive number; height and threshold must lie in [`HEIGHT_RANGE_KM`]
    /// and [`THRESHOLD_RANGE_DB`].
    pub fn check_domain(&self) -> std::result::Result<(), DomainViolation> {
        if !(self.frequency_khz > 0.0 && self.frequency_khz.is_finite()) {
            return Err(DomainViolation {
                parameter: "frequency_khz",
                value: self.frequency_khz,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        check_range("height_km", self.height_km, &HEIGHT_RANGE_KM)?;
        check_range("threshold_db", self.threshold_db, &THRESHOLD_RANGE_DB)
    }
}

fn check_range(
    parameter: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> std::result::Result<(), DomainViolation> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(DomainViolation {
            parameter,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

// ============================================================================
// Model Parameters
// ============================================================================

/// How queries outside the documented physical ranges are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Log a warning and compute anyway.
    #[default]
    Permissive,
    /// Reject the query with [`WidthError::Domain`].
    Strict,
}

/// Configurable parameters for the width model.
///
/// # Example
///
/// ```
/// use lunar_quiet_model::{ValidationMode, WidthModelParams};
///
/// // Use defaults
/// let params = WidthModelParams::default();
/// assert_eq!(params.validation, ValidationMode::Permissive);
///
/// // Or load from YAML, overriding only some fields
/// let params = WidthModelParams::from_yaml_str("validation: strict\n")?;
/// assert_eq!(params.validation, ValidationMode::Strict);
/// assert_eq!(params.offsets.a, 7.0);
/// # Ok::<(), lunar_quiet_model::WidthError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidthModelParams {
    /// Earth-Moon geometry.
    pub constants: PhysicalConstants,
    /// Coefficient shifts used for the uncertainty bounds.
    pub offsets: UncertaintyOffsets,
    /// Handling of out-of-range queries.
    pub validation: ValidationMode,
    /// Handling of queries outside the sampled coefficient grid.
    pub extrapolation: ExtrapolationPolicy,
}

impl WidthModelParams {
    /// Parse parameters from YAML text. Missing fields take their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| WidthError::Config(e.to_string()))
    }

    /// Load parameters from a YAML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| WidthError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&text)
    }

    /// Return these parameters with strict validation enabled.
    pub fn strict(mut self) -> Self {
        self.validation = ValidationMode::Strict;
        self
    }
}
