//! Error types for the width model.

use lunar_quiet_grid::GridError;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when building or querying the width model.
#[derive(Debug, Error)]
pub enum WidthError {
    /// The coefficient grid could not be loaded.
    #[error("Coefficient grid error: {0}")]
    Grid(#[from] GridError),

    /// A query is outside the documented physical range (strict mode only).
    #[error("Query outside valid domain: {0}")]
    Domain(DomainViolation),

    /// The model produced no valid number for this query.
    #[error("Numerically invalid result: {0}")]
    NumericalInvalid(NumericalIssue),

    /// The model parameter file could not be loaded.
    #[error("Invalid model configuration: {0}")]
    Config(String),
}

/// A query parameter outside its documented range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainViolation {
    /// Name of the offending parameter.
    pub parameter: &'static str,
    /// Value supplied by the caller.
    pub value: f64,
    /// Lowest accepted value.
    pub min: f64,
    /// Highest accepted value.
    pub max: f64,
}

impl fmt::Display for DomainViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is not within [{}, {}]",
            self.parameter, self.value, self.min, self.max
        )
    }
}

/// Reason a computation produced no valid number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericalIssue {
    /// The tangent-point quadratic has no real roots.
    NegativeDiscriminant {
        /// Value of `B^2 - 4AC`.
        discriminant: f64,
    },
    /// Neither root of the tangent-point quadratic is strictly positive.
    NoPositiveRoot {
        /// Larger root.
        root1: f64,
        /// Smaller root.
        root2: f64,
    },
    /// The tangent point lies outside the receiver's sphere.
    TangentOutsideSphere {
        /// Selected root.
        x: f64,
        /// Radius of the receiver's sphere (km).
        radius_km: f64,
    },
    /// The width estimate contains NaN or infinity.
    NonFiniteEstimate,
}

impl fmt::Display for NumericalIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericalIssue::NegativeDiscriminant { discriminant } => {
                write!(f, "tangent quadratic has negative discriminant {}", discriminant)
            }
            NumericalIssue::NoPositiveRoot { root1, root2 } => {
                write!(f, "tangent quadratic has no positive root ({}, {})", root1, root2)
            }
            NumericalIssue::TangentOutsideSphere { x, radius_km } => {
                write!(f, "tangent point x = {} km lies outside radius {} km", x, radius_km)
            }
            NumericalIssue::NonFiniteEstimate => write!(f, "width estimate is not finite"),
        }
    }
}
