//! Error types for the coefficient grid crate.

use thiserror::Error;

/// Errors that can occur while loading or building a coefficient grid.
///
/// Every variant is fatal at model construction time; there is no partially
/// loaded grid.
#[derive(Debug, Error)]
pub enum GridError {
    /// I/O error reading a grid file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML decoding error.
    #[error("YAML decode error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension does not map to a known grid format.
    #[error("Unsupported grid format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    /// An axis has fewer than two samples, so no cell can be formed.
    #[error("Axis '{axis}' has {len} samples (need at least 2)")]
    AxisTooShort {
        /// Axis name.
        axis: &'static str,
        /// Number of samples found.
        len: usize,
    },

    /// An axis is not strictly increasing (or contains a non-finite sample).
    #[error("Axis '{axis}' is not strictly increasing at index {index}")]
    AxisNotIncreasing {
        /// Axis name.
        axis: &'static str,
        /// Index of the first offending sample.
        index: usize,
    },

    /// A value table does not match the axis lengths.
    #[error("Table '{table}' has shape mismatch: expected {expected_rows}x{expected_cols}, {detail}")]
    ShapeMismatch {
        /// Table name.
        table: &'static str,
        /// Expected number of rows (height samples).
        expected_rows: usize,
        /// Expected number of columns (threshold samples).
        expected_cols: usize,
        /// What was actually found.
        detail: String,
    },

    /// A value table contains NaN or infinity.
    #[error("Table '{table}' has non-finite value at [{row}][{col}]")]
    NonFiniteValue {
        /// Table name.
        table: &'static str,
        /// Row (height index).
        row: usize,
        /// Column (threshold index).
        col: usize,
    },
}
