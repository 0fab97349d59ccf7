use std::sync::Arc;

use stair_kernel::{Point3d, Transform, Vec3};
use tracing::{info, instrument};

use crate::element::{AggregateElements, ElementRef};
use crate::error::StairError;
use crate::flight::StairFlight;
use crate::flight::dimensions::StairFlightSpec;
use crate::floor::Floor;
use crate::landing::build_landing;
use crate::material::Material;
use crate::options::{BuildOptions, WORLD_UP};
use crate::stair_type::{StairType, StairTypology};
use crate::walking_line::WalkingLine;

/// Slack for riser counts on rises that are exact multiples of the riser.
const RISER_COUNT_SLACK: f64 = 1e-9;

/// A complete stair: flights bottom to top and the landings between them.
#[derive(Debug, Clone)]
pub struct Stair {
    typology: StairTypology,
    walking_lines: Vec<WalkingLine>,
    stair_type: Option<Arc<StairType>>,
    spec: StairFlightSpec,
    material: Material,
    placement: Option<Transform>,
    flights: Vec<StairFlight>,
    landings: Vec<Floor>,
}

impl Stair {
    /// Build a stair from a shared type. `walking_lines` must match the
    /// typology's arity; the second line is lifted by the first flight's
    /// rise before it is built.
    pub fn new(
        typology: StairTypology,
        stair_type: Arc<StairType>,
        walking_lines: Vec<WalkingLine>,
        placement: Option<Transform>,
    ) -> Result<Self, StairError> {
        Self::new_with_options(typology, stair_type, walking_lines, placement, &BuildOptions::default())
    }

    pub fn new_with_options(
        typology: StairTypology,
        stair_type: Arc<StairType>,
        walking_lines: Vec<WalkingLine>,
        placement: Option<Transform>,
        options: &BuildOptions,
    ) -> Result<Self, StairError> {
        let spec = *stair_type.flight_spec();
        let material = stair_type.material().clone();
        Self::assemble(typology, Some(stair_type), spec, material, walking_lines, placement, options)
    }

    /// Build a stair from explicit dimensions with the default material.
    pub fn from_spec(
        typology: StairTypology,
        spec: StairFlightSpec,
        walking_lines: Vec<WalkingLine>,
        placement: Option<Transform>,
    ) -> Result<Self, StairError> {
        Self::from_spec_with_options(typology, spec, walking_lines, placement, &BuildOptions::default())
    }

    pub fn from_spec_with_options(
        typology: StairTypology,
        spec: StairFlightSpec,
        walking_lines: Vec<WalkingLine>,
        placement: Option<Transform>,
        options: &BuildOptions,
    ) -> Result<Self, StairError> {
        Self::assemble(typology, None, spec, Material::DEFAULT, walking_lines, placement, options)
    }

    /// Half-turn stair climbing `height` from `origin`.
    ///
    /// The rise is split into equal risers no taller than the type's riser
    /// height, the first flight taking the odd one. The second flight runs
    /// back alongside the first, `space` to its left.
    pub fn half_turn(
        stair_type: Arc<StairType>,
        origin: Point3d,
        direction: Vec3,
        height: f64,
        space: f64,
        placement: Option<Transform>,
    ) -> Result<Self, StairError> {
        Self::half_turn_with_options(stair_type, origin, direction, height, space, placement, &BuildOptions::default())
    }

    pub fn half_turn_with_options(
        stair_type: Arc<StairType>,
        origin: Point3d,
        direction: Vec3,
        height: f64,
        space: f64,
        placement: Option<Transform>,
        options: &BuildOptions,
    ) -> Result<Self, StairError> {
        if !height.is_finite() || height <= 0.0 {
            return Err(StairError::out_of_range("height", height, "must be positive and finite"));
        }
        if !space.is_finite() || space < 0.0 {
            return Err(StairError::out_of_range("space", space, "must be non-negative and finite"));
        }
        let direction = direction
            .horizontal()
            .normalized()
            .ok_or_else(|| StairError::DegenerateWalkingLine {
                reason: "half-turn direction has no horizontal component".into(),
            })?;

        let nominal = stair_type.flight_spec();
        let riser_count = (height / nominal.riser_height - RISER_COUNT_SLACK).ceil().max(1.0) as usize;
        if riser_count < 2 {
            return Err(StairError::out_of_range(
                "height",
                height,
                "must span at least two risers",
            ));
        }
        let spec = nominal.with_riser_height(height / riser_count as f64);
        let lower_count = riser_count.div_ceil(2);
        let upper_count = riser_count - lower_count;

        let tread = spec.tread_length;
        let lower = WalkingLine::new(origin, origin + direction * (lower_count as f64 * tread));
        let upper_start = lower.end + WORLD_UP.cross(&direction) * (spec.flight_width + space);
        let upper = WalkingLine::new(upper_start, upper_start + direction * (-(upper_count as f64) * tread));

        let material = stair_type.material().clone();
        Self::assemble(
            StairTypology::HalfTurnStair,
            Some(stair_type),
            spec,
            material,
            vec![lower, upper],
            placement,
            options,
        )
    }

    #[instrument(skip_all, fields(%typology, lines = walking_lines.len()))]
    fn assemble(
        typology: StairTypology,
        stair_type: Option<Arc<StairType>>,
        spec: StairFlightSpec,
        material: Material,
        walking_lines: Vec<WalkingLine>,
        placement: Option<Transform>,
        options: &BuildOptions,
    ) -> Result<Self, StairError> {
        check_input(typology, walking_lines.len())?;
        spec.validate()?;

        let (flights, landings) = match typology {
            StairTypology::StraightRunStair => {
                let flight =
                    StairFlight::build_with(walking_lines[0], &spec, placement.as_ref(), material.clone(), options)?;
                (vec![flight], Vec::new())
            }
            StairTypology::QuarterTurnStair | StairTypology::HalfTurnStair => {
                let lower =
                    StairFlight::build_with(walking_lines[0], &spec, placement.as_ref(), material.clone(), options)?;
                let raised = walking_lines[1].translated(WORLD_UP * lower.height());
                let upper = StairFlight::build_with(raised, &spec, placement.as_ref(), material.clone(), options)?;
                let landing = build_landing(&lower, &upper, options)?;
                (vec![lower, upper], vec![landing])
            }
            other => return Err(StairError::UnsupportedTypology(other)),
        };

        let stair = Self {
            typology,
            walking_lines,
            stair_type,
            spec,
            material,
            placement,
            flights,
            landings,
        };
        info!(
            flights = stair.flights.len(),
            landings = stair.landings.len(),
            height = stair.height(),
            "stair built"
        );
        Ok(stair)
    }

    pub fn typology(&self) -> StairTypology {
        self.typology
    }

    /// The walking lines as supplied, before any lifting.
    pub fn walking_lines(&self) -> &[WalkingLine] {
        &self.walking_lines
    }

    pub fn stair_type(&self) -> Option<&Arc<StairType>> {
        self.stair_type.as_ref()
    }

    /// Dimensions every flight was built with.
    pub fn spec(&self) -> &StairFlightSpec {
        &self.spec
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn placement(&self) -> Option<&Transform> {
        self.placement.as_ref()
    }

    pub fn flights(&self) -> &[StairFlight] {
        &self.flights
    }

    pub fn landings(&self) -> &[Floor] {
        &self.landings
    }

    /// Total rise over all flights.
    pub fn height(&self) -> f64 {
        self.flights.iter().map(StairFlight::height).sum()
    }
}

impl AggregateElements for Stair {
    fn elements(&self) -> Vec<ElementRef<'_>> {
        self.flights
            .iter()
            .map(ElementRef::Flight)
            .chain(self.landings.iter().map(ElementRef::Landing))
            .collect()
    }
}

/// Reject typologies that cannot be built and walking-line counts that do
/// not match, before any geometry is made.
fn check_input(typology: StairTypology, lines: usize) -> Result<(), StairError> {
    match typology.arity() {
        None => Err(StairError::UnsupportedTypology(typology)),
        Some(expected) if expected != lines => Err(StairError::InvalidArgument {
            typology,
            expected,
            actual: lines,
        }),
        Some(_) => Ok(()),
    }
}
