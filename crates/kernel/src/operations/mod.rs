pub mod sweep;

use thiserror::Error;

/// Structured error type for geometry operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    /// Profile has too few points for the operation.
    #[error("profile has {provided} points, need at least {required}")]
    InsufficientProfile { required: usize, provided: usize },

    /// Distance / depth / thickness is zero, negative or not finite.
    #[error("{parameter} must be positive, got {value}")]
    InvalidDimension { parameter: &'static str, value: f64 },

    /// Direction vector has zero length.
    #[error("direction vector has zero length")]
    ZeroDirection,

    /// Profile encloses no area or lies in the sweep direction.
    #[error("profile is degenerate: {reason}")]
    DegenerateProfile { reason: &'static str },
}
