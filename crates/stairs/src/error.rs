use stair_kernel::OperationError;
use thiserror::Error;

use crate::stair_type::StairTypology;

/// Errors raised while constructing stairs, flights and landings.
///
/// Every constructor either returns a complete element or one of these;
/// nothing partially built is handed back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StairError {
    #[error("{parameter} = {value} is out of range: {requirement}")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        requirement: &'static str,
    },

    /// Walking-line count does not match the typology.
    #[error("{typology} takes {expected} walking line(s), got {actual}")]
    InvalidArgument {
        typology: StairTypology,
        expected: usize,
        actual: usize,
    },

    #[error("degenerate walking line: {reason}")]
    DegenerateWalkingLine { reason: String },

    #[error("stair typology {0} is not supported")]
    UnsupportedTypology(StairTypology),

    /// Flights whose directions cannot be joined by a landing.
    #[error("cannot build a landing between flights {angle_degrees:.3} degrees apart")]
    UnsupportedLandingGeometry { angle_degrees: f64 },

    #[error("landing polygon is degenerate: {reason}")]
    DegenerateLanding { reason: &'static str },

    #[error("sweep failed: {0}")]
    Sweep(#[from] OperationError),
}

impl StairError {
    pub(crate) fn out_of_range(parameter: &'static str, value: f64, requirement: &'static str) -> Self {
        Self::ParameterOutOfRange {
            parameter,
            value,
            requirement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = StairError::out_of_range("riser_height", -0.2, "must be positive");
        assert_eq!(err.to_string(), "riser_height = -0.2 is out of range: must be positive");

        let err = StairError::InvalidArgument {
            typology: StairTypology::HalfTurnStair,
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "HalfTurnStair takes 2 walking line(s), got 3");
    }

    #[test]
    fn test_sweep_errors_convert() {
        let err: StairError = OperationError::ZeroDirection.into();
        assert!(matches!(err, StairError::Sweep(OperationError::ZeroDirection)));
    }
}
