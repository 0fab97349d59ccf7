use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StairError;
use crate::flight::dimensions::StairFlightSpec;
use crate::material::Material;

/// Topological pattern of flights and landings.
///
/// Every identifier is recognized and serializes under its own name; only
/// [`StraightRunStair`](Self::StraightRunStair),
/// [`QuarterTurnStair`](Self::QuarterTurnStair) and
/// [`HalfTurnStair`](Self::HalfTurnStair) can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StairTypology {
    /// One straight flight.
    StraightRunStair,
    /// Two straight flights in line with a landing between them.
    TwoStraightRunStair,
    QuarterWindingStair,
    /// Two straight flights turning 90 degrees at a quarter-space landing.
    QuarterTurnStair,
    HalfWindingStair,
    /// Two straight flights turning 180 degrees at a half-space landing.
    HalfTurnStair,
    TwoQuarterWindingStair,
    TwoQuarterTurnStair,
    ThreeQuarterWindingStair,
    ThreeQuarterTurnStair,
    SpiralStair,
    DoubleReturnStair,
    CurvedRunStair,
    TwoCurvedRunStair,
    /// User-defined arrangement.
    OtherOperation,
}

impl StairTypology {
    pub const ALL: [StairTypology; 15] = [
        StairTypology::StraightRunStair,
        StairTypology::TwoStraightRunStair,
        StairTypology::QuarterWindingStair,
        StairTypology::QuarterTurnStair,
        StairTypology::HalfWindingStair,
        StairTypology::HalfTurnStair,
        StairTypology::TwoQuarterWindingStair,
        StairTypology::TwoQuarterTurnStair,
        StairTypology::ThreeQuarterWindingStair,
        StairTypology::ThreeQuarterTurnStair,
        StairTypology::SpiralStair,
        StairTypology::DoubleReturnStair,
        StairTypology::CurvedRunStair,
        StairTypology::TwoCurvedRunStair,
        StairTypology::OtherOperation,
    ];

    /// Number of walking lines the typology is built from, or `None` when
    /// it cannot be built.
    pub fn arity(self) -> Option<usize> {
        match self {
            StairTypology::StraightRunStair => Some(1),
            StairTypology::QuarterTurnStair | StairTypology::HalfTurnStair => Some(2),
            _ => None,
        }
    }

    pub fn is_supported(self) -> bool {
        self.arity().is_some()
    }
}

impl fmt::Display for StairTypology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Shape of a single flight's walking line. Flights built from a
/// [`WalkingLine`](crate::WalkingLine) are always `Straight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StairFlightType {
    #[default]
    Straight,
    Winder,
    Spiral,
    Curved,
    Freeform,
}

/// Shared template of flight dimensions and material.
///
/// Validated once at construction and never mutated afterwards, so one
/// instance can be shared by `Arc` across stairs and threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairType {
    name: String,
    spec: StairFlightSpec,
    material: Material,
}

impl StairType {
    pub fn new(
        name: impl Into<String>,
        spec: StairFlightSpec,
        material: Option<Material>,
    ) -> Result<Self, StairError> {
        spec.validate()?;
        Ok(Self {
            name: name.into(),
            spec,
            material: material.unwrap_or(Material::DEFAULT),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flight_spec(&self) -> &StairFlightSpec {
        &self.spec
    }

    pub fn riser_height(&self) -> f64 {
        self.spec.riser_height
    }

    pub fn tread_length(&self) -> f64 {
        self.spec.tread_length
    }

    pub fn waist_thickness(&self) -> f64 {
        self.spec.waist_thickness
    }

    pub fn flight_width(&self) -> f64 {
        self.spec.flight_width
    }

    pub fn nosing_length(&self) -> f64 {
        self.spec.nosing_length
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}
