pub mod dimensions;
pub mod profile;

use stair_kernel::{Body, Point3d, Polygon, Transform, Vec3};
use tracing::{debug, info, instrument};

use crate::element::{Extrude, HasMaterial, SolidElement};
use crate::error::StairError;
use crate::material::Material;
use crate::options::{BuildOptions, WORLD_UP};
use crate::stair_type::StairFlightType;
use crate::walking_line::WalkingLine;
use dimensions::StairFlightSpec;
use profile::build_profile;

/// Slack for counting whole treads on lines that are exact multiples of
/// the tread length.
const TREAD_COUNT_SLACK: f64 = 1e-9;

/// One straight run of steps swept across its width.
#[derive(Debug, Clone)]
pub struct StairFlight {
    flight_type: StairFlightType,
    walking_line: WalkingLine,
    spec: StairFlightSpec,
    number_of_treads: usize,
    profile: Polygon,
    top: Point3d,
    landing_thickness: f64,
    base_thickness: f64,
    /// Walking-line frame alone.
    frame: Transform,
    placement: Transform,
    /// `frame` followed by `placement`.
    transform: Transform,
    start: Point3d,
    end: Point3d,
    material: Material,
    body: Body,
}

impl StairFlight {
    /// Build a flight with the default material and options.
    pub fn build(
        walking_line: WalkingLine,
        spec: &StairFlightSpec,
        placement: Option<&Transform>,
    ) -> Result<Self, StairError> {
        Self::build_with(walking_line, spec, placement, Material::DEFAULT, &BuildOptions::default())
    }

    #[instrument(skip(material, options))]
    pub fn build_with(
        walking_line: WalkingLine,
        spec: &StairFlightSpec,
        placement: Option<&Transform>,
        material: Material,
        options: &BuildOptions,
    ) -> Result<Self, StairError> {
        spec.validate()?;
        let direction = walking_line.flight_direction(options.tolerance.angular)?;

        let number_of_treads = (walking_line.length() / spec.tread_length + TREAD_COUNT_SLACK).floor() as usize;
        if number_of_treads == 0 {
            return Err(StairError::DegenerateWalkingLine {
                reason: format!(
                    "length {} is shorter than one tread ({})",
                    walking_line.length(),
                    spec.tread_length
                ),
            });
        }

        let profile = build_profile(number_of_treads, spec)?;
        debug!(
            landing_thickness = profile.landing_thickness,
            base_thickness = profile.base_thickness,
            "flight profile built"
        );

        let z_axis = direction
            .cross(&WORLD_UP)
            .normalized()
            .ok_or_else(|| StairError::DegenerateWalkingLine {
                reason: "walking line is vertical".into(),
            })?;
        let y_axis = z_axis.cross(&direction);
        let frame = Transform::from_axes(walking_line.start, direction, y_axis, z_axis);
        let placement = placement.copied().unwrap_or_default();
        let transform = frame.then(&placement);

        let world_profile = profile.polygon.transformed(&transform);
        let body = Body::sweep(
            world_profile.vertices(),
            &[],
            transform.z_axis(),
            spec.flight_width,
            true,
        )?;

        let flight = Self {
            flight_type: StairFlightType::Straight,
            walking_line,
            spec: *spec,
            number_of_treads,
            start: transform.transform_point(&Point3d::ORIGIN),
            end: transform.transform_point(&profile.top),
            profile: profile.polygon,
            top: profile.top,
            landing_thickness: profile.landing_thickness,
            base_thickness: profile.base_thickness,
            frame,
            placement,
            transform,
            material,
            body,
        };
        info!(
            treads = flight.number_of_treads,
            height = flight.height(),
            "stair flight built"
        );
        Ok(flight)
    }

    pub fn flight_type(&self) -> StairFlightType {
        self.flight_type
    }

    pub fn walking_line(&self) -> &WalkingLine {
        &self.walking_line
    }

    pub fn spec(&self) -> &StairFlightSpec {
        &self.spec
    }

    pub fn number_of_treads(&self) -> usize {
        self.number_of_treads
    }

    pub fn number_of_risers(&self) -> usize {
        self.number_of_treads
    }

    pub fn riser_height(&self) -> f64 {
        self.spec.riser_height
    }

    pub fn tread_length(&self) -> f64 {
        self.spec.tread_length
    }

    pub fn flight_width(&self) -> f64 {
        self.spec.flight_width
    }

    /// Total rise of the flight.
    pub fn height(&self) -> f64 {
        self.spec.riser_height * self.number_of_risers() as f64
    }

    pub fn landing_thickness(&self) -> f64 {
        self.landing_thickness
    }

    pub fn base_thickness(&self) -> f64 {
        self.base_thickness
    }

    /// Foot of the first riser, in world coordinates.
    pub fn start(&self) -> Point3d {
        self.start
    }

    /// Front edge of the top tread, in world coordinates.
    pub fn end(&self) -> Point3d {
        self.end
    }

    /// Unit direction of the walking line.
    pub fn direction(&self) -> Vec3 {
        self.frame.x_axis()
    }

    pub fn placement(&self) -> &Transform {
        &self.placement
    }

    /// Front edge of the top tread before the placement is applied.
    pub(crate) fn unplaced_end(&self) -> Point3d {
        self.frame.transform_point(&self.top)
    }

    /// The stepped profile swept into world space.
    pub fn profile_transformed(&self) -> Polygon {
        self.profile.transformed(&self.transform)
    }
}

impl Extrude for StairFlight {
    fn profile(&self) -> &Polygon {
        &self.profile
    }

    fn extrude_direction(&self) -> Vec3 {
        Vec3::Z
    }

    fn extrude_depth(&self) -> f64 {
        self.spec.flight_width
    }

    fn both_sides(&self) -> bool {
        true
    }
}

impl SolidElement for StairFlight {
    fn body(&self) -> &Body {
        &self.body
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl HasMaterial for StairFlight {
    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn spec() -> StairFlightSpec {
        StairFlightSpec::new(0.2, 0.3, 0.15, 1.2, 0.0)
    }

    fn line_along_x(length: f64) -> WalkingLine {
        WalkingLine::new(Point3d::ORIGIN, Point3d::planar(length, 0.0))
    }

    #[test]
    fn test_tread_count_and_height() {
        let flight = StairFlight::build(line_along_x(10.0), &spec(), None).unwrap();
        assert_eq!(flight.flight_type(), StairFlightType::Straight);
        assert_eq!(flight.number_of_treads(), 33);
        assert_eq!(flight.number_of_risers(), 33);
        assert!((flight.height() - 6.6).abs() < 1e-9);
    }

    #[test]
    fn test_exact_multiple_counts_every_tread() {
        let flight = StairFlight::build(line_along_x(3.0), &spec(), None).unwrap();
        assert_eq!(flight.number_of_treads(), 10);
    }

    #[test]
    fn test_start_and_end_in_world() {
        let flight = StairFlight::build(line_along_x(3.0), &spec(), None).unwrap();
        assert_abs_diff_eq!(flight.start(), Point3d::ORIGIN);
        assert_abs_diff_eq!(flight.end(), Point3d::new(3.0, 0.0, 2.0), epsilon = 1e-9);
    }

    #[test]
    fn test_frame_follows_walking_line() {
        let line = WalkingLine::new(Point3d::new(1.0, 2.0, 0.5), Point3d::new(1.0, 5.0, 0.5));
        let flight = StairFlight::build(line, &spec(), None).unwrap();
        assert_abs_diff_eq!(flight.direction(), Vec3::Y, epsilon = 1e-12);
        assert_abs_diff_eq!(flight.end(), Point3d::new(1.0, 5.0, 2.5), epsilon = 1e-9);
    }

    #[test]
    fn test_body_spans_width_symmetrically() {
        let flight = StairFlight::build(line_along_x(3.0), &spec(), None).unwrap();
        let bb = flight.body().bounding_box();
        assert!((bb.min.y + 0.6).abs() < 1e-9);
        assert!((bb.max.y - 0.6).abs() < 1e-9);
        assert!((bb.max.z - 2.0).abs() < 1e-9);
        assert!(bb.min.z.abs() < 1e-9);
    }

    #[test]
    fn test_volume_is_profile_area_times_width() {
        let flight = StairFlight::build(line_along_x(2.4), &spec(), None).unwrap();
        let expected = flight.profile().area() * 1.2;
        assert!((flight.body().volume() - expected).abs() < 1e-9);
        assert!(flight.body().validate().is_valid());
    }

    #[test]
    fn test_placement_moves_geometry() {
        let placement = Transform::translation(10.0, 0.0, 3.0);
        let flight = StairFlight::build(line_along_x(3.0), &spec(), Some(&placement)).unwrap();
        assert_abs_diff_eq!(flight.start(), Point3d::new(10.0, 0.0, 3.0), epsilon = 1e-12);
        assert_abs_diff_eq!(flight.unplaced_end(), Point3d::new(3.0, 0.0, 2.0), epsilon = 1e-9);
        let bb = flight.body().bounding_box();
        assert!((bb.min.z - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_line_is_rejected() {
        let err = StairFlight::build(line_along_x(0.2), &spec(), None).unwrap_err();
        assert!(matches!(err, StairError::DegenerateWalkingLine { .. }));
    }

    #[test]
    fn test_invalid_spec_is_rejected_before_geometry() {
        let bad = StairFlightSpec { waist_thickness: 0.0, ..spec() };
        let err = StairFlight::build(line_along_x(0.0), &bad, None).unwrap_err();
        assert!(matches!(
            err,
            StairError::ParameterOutOfRange { parameter: "waist_thickness", .. }
        ));
    }

    #[test]
    fn test_nosing_reaching_underside_is_rejected() {
        let long = StairFlightSpec { nosing_length: 0.28, ..spec() };
        let err = StairFlight::build(line_along_x(3.0), &long, None).unwrap_err();
        assert!(matches!(
            err,
            StairError::ParameterOutOfRange { parameter: "nosing_length", .. }
        ));
    }

    #[test]
    fn test_default_material_is_injected() {
        let flight = StairFlight::build(line_along_x(3.0), &spec(), None).unwrap();
        assert_eq!(flight.material(), &Material::DEFAULT);
    }
}
