use serde::{Deserialize, Serialize};

use crate::error::StairError;

/// Step dimensions of one flight, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StairFlightSpec {
    pub riser_height: f64,
    pub tread_length: f64,
    /// Slab thickness measured perpendicular to the pitch line.
    pub waist_thickness: f64,
    pub flight_width: f64,
    /// Overhang of a tread past the riser below it.
    pub nosing_length: f64,
}

impl StairFlightSpec {
    pub fn new(
        riser_height: f64,
        tread_length: f64,
        waist_thickness: f64,
        flight_width: f64,
        nosing_length: f64,
    ) -> Self {
        Self {
            riser_height,
            tread_length,
            waist_thickness,
            flight_width,
            nosing_length,
        }
    }

    /// Reject non-finite values, non-positive dimensions and a nosing
    /// outside `[0, tread_length)`.
    pub fn validate(&self) -> Result<(), StairError> {
        let positive = [
            ("riser_height", self.riser_height),
            ("tread_length", self.tread_length),
            ("waist_thickness", self.waist_thickness),
            ("flight_width", self.flight_width),
        ];
        for (parameter, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(StairError::out_of_range(parameter, value, "must be positive and finite"));
            }
        }
        if !self.nosing_length.is_finite() || self.nosing_length < 0.0 {
            return Err(StairError::out_of_range(
                "nosing_length",
                self.nosing_length,
                "must be non-negative and finite",
            ));
        }
        if self.nosing_length >= self.tread_length {
            return Err(StairError::out_of_range(
                "nosing_length",
                self.nosing_length,
                "must be shorter than tread_length",
            ));
        }
        Ok(())
    }

    /// The same dimensions with a different riser height.
    pub fn with_riser_height(self, riser_height: f64) -> Self {
        Self { riser_height, ..self }
    }
}
