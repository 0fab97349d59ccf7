//! Landing slabs joining two consecutive flights.
//!
//! The outline is computed on the horizontal plane z = 0 from the top of the
//! lower flight and the foot of the upper one, both taken before the stair
//! placement, then lifted to the landing elevation and placed like the
//! flights.

pub mod hull;
pub mod projection;

use stair_kernel::geometry::polygon::{deduplicate, remove_collinear};
use stair_kernel::{Plane, Point3d, Polygon, Tolerance, Transform, Vec3};
use tracing::{debug, info, instrument, warn};

use crate::element::HasMaterial;
use crate::error::StairError;
use crate::flight::StairFlight;
use crate::floor::Floor;
use crate::options::{BuildOptions, LandingAlgorithm, WORLD_UP};

/// Horizontal footprint of one end of a flight, flattened to z = 0.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FlightEnd {
    /// Midpoint of the end edge on the walking line.
    pub point: Point3d,
    /// Horizontal unit direction of travel.
    pub direction: Vec3,
    /// Horizontal unit vector to the left of travel.
    pub left: Vec3,
    pub width: f64,
    pub base_thickness: f64,
    /// Vertical plane containing the flight's left edge.
    pub left_side: Plane,
    pub right_side: Plane,
}

impl FlightEnd {
    fn new(flight: &StairFlight, point: Point3d) -> Result<Self, StairError> {
        let direction = flight
            .direction()
            .horizontal()
            .normalized()
            .ok_or(StairError::DegenerateLanding {
                reason: "flight has no horizontal direction",
            })?;
        let left = WORLD_UP.cross(&direction);
        let point = point.with_z(0.0);
        let half_width = flight.flight_width() / 2.0;
        let side = |offset: f64| {
            Plane::new(point + left * offset, left).ok_or(StairError::DegenerateLanding {
                reason: "flight side plane has no normal",
            })
        };
        Ok(Self {
            point,
            direction,
            left,
            width: flight.flight_width(),
            base_thickness: flight.base_thickness(),
            left_side: side(half_width)?,
            right_side: side(-half_width)?,
        })
    }

    pub fn left_corner(&self) -> Point3d {
        self.point + self.left * (self.width / 2.0)
    }

    pub fn right_corner(&self) -> Point3d {
        self.point - self.left * (self.width / 2.0)
    }
}

/// Build the landing slab between `lower` and the flight that follows it.
///
/// The slab's top is flush with the top tread of `lower` and it is as thick
/// as that flight's waist cut at the landing.
#[instrument(skip_all, fields(algorithm = ?options.landing))]
pub fn build_landing(
    lower: &StairFlight,
    upper: &StairFlight,
    options: &BuildOptions,
) -> Result<Floor, StairError> {
    let top = FlightEnd::new(lower, lower.unplaced_end())?;
    let foot = FlightEnd::new(upper, upper.walking_line().start)?;

    let angle = top.direction.angle_to(&foot.direction);
    if options.tolerance.is_zero_angle(angle) {
        return Err(StairError::UnsupportedLandingGeometry {
            angle_degrees: angle.to_degrees(),
        });
    }

    let outline = match options.landing {
        LandingAlgorithm::Projection => projection::landing_outline(&top, &foot, angle, &options.tolerance)?,
        LandingAlgorithm::ConvexHull => hull::landing_outline(&top, &foot),
    };
    let polygon = finish_outline(outline, &options.tolerance)?;

    let elevation = lower.walking_line().start.z + lower.height() - lower.landing_thickness();
    let transform = Transform::translation(0.0, 0.0, elevation).then(lower.placement());

    info!(
        turn_degrees = angle.to_degrees(),
        vertices = polygon.len(),
        area = polygon.area(),
        elevation,
        "landing outline built"
    );
    Floor::new(polygon, lower.landing_thickness(), transform, lower.material().clone())
}

/// Flatten, drop repeated and collinear corners, wind counter-clockwise
/// about +Z and reject outlines that enclose nothing or cross themselves.
fn finish_outline(points: Vec<Point3d>, tolerance: &Tolerance) -> Result<Polygon, StairError> {
    let raw = points.len();
    let flat: Vec<Point3d> = points.iter().map(|p| p.with_z(0.0)).collect();
    let ring = remove_collinear(&deduplicate(&flat, tolerance.coincidence), tolerance.coincidence);
    debug!(raw, kept = ring.len(), "landing outline cleaned");

    let reject = |reason: &'static str| {
        warn!(reason, "landing outline rejected");
        StairError::DegenerateLanding { reason }
    };

    if ring.len() < 3 {
        return Err(reject("fewer than three distinct corners"));
    }
    let mut polygon = Polygon::new(ring)?;
    if polygon.signed_area_xy() < 0.0 {
        polygon = polygon.reversed();
    }
    if polygon.area() < tolerance.coincidence {
        return Err(reject("outline encloses no area"));
    }
    if !polygon.is_simple(tolerance.coincidence) {
        return Err(reject("outline intersects itself"));
    }
    Ok(polygon)
}
