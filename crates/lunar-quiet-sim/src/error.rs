//! Error types for simulation setup.

use thiserror::Error;

/// Errors that can occur when describing a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// A configuration value is out of range or inconsistent.
    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    /// A stepped density table is empty or not sorted by depth.
    #[error("Invalid density step table: {0}")]
    InvalidStepTable(String),

    /// YAML decoding error.
    #[error("YAML decode error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
