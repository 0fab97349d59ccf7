use stair_kernel::{Point3d, Polygon};

use crate::error::StairError;
use crate::flight::dimensions::StairFlightSpec;

/// Stepped cross-section of a flight in its local frame: X runs along the
/// walking line, Y points up, the first riser starts at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightProfile {
    /// Counter-clockwise about local +Z.
    pub polygon: Polygon,
    /// Front edge of the top tread, `(n·T, n·R)`.
    pub top: Point3d,
    /// Vertical length of the waist where it meets a horizontal cut.
    pub landing_thickness: f64,
    /// Horizontal length of the waist where it meets the floor.
    pub base_thickness: f64,
}

pub fn build_profile(riser_count: usize, spec: &StairFlightSpec) -> Result<FlightProfile, StairError> {
    let riser = spec.riser_height;
    let tread = spec.tread_length;
    let waist = spec.waist_thickness;

    let mut points = Vec::with_capacity(2 * riser_count + 3);
    for i in 0..riser_count {
        let i = i as f64;
        points.push(Point3d::planar(i * tread + spec.nosing_length, i * riser));
        points.push(Point3d::planar(i * tread, (i + 1.0) * riser));
    }
    let n = riser_count as f64;
    let top = Point3d::planar(n * tread, n * riser);
    points.push(top);

    // The waist runs parallel to the pitch line (one tread over one riser).
    // Cutting it vertically and horizontally stretches it by 1/cos and
    // 1/sin of the pitch respectively.
    let pitch = tread.hypot(riser);
    let landing_thickness = waist * pitch / tread;
    let base_thickness = waist * pitch / riser;

    // Underside must stay below the steps: the top cut may not reach the
    // floor before the base cut does.
    if n * riser <= landing_thickness || n * tread <= base_thickness {
        return Err(StairError::out_of_range(
            "waist_thickness",
            waist,
            "must be thinner than the flight it supports",
        ));
    }

    // Tread fronts sit `base_thickness - nosing` above the underside along
    // the pitch; a nosing reaching the base cut puts them on or below it.
    if spec.nosing_length >= base_thickness {
        return Err(StairError::out_of_range(
            "nosing_length",
            spec.nosing_length,
            "must be shorter than the base cut of the waist",
        ));
    }

    points.push(Point3d::planar(top.x, top.y - landing_thickness));
    points.push(Point3d::planar(base_thickness, 0.0));
    points.reverse();

    Ok(FlightProfile {
        polygon: Polygon::new(points)?,
        top,
        landing_thickness,
        base_thickness,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn spec() -> StairFlightSpec {
        StairFlightSpec::new(0.2, 0.3, 0.15, 1.0, 0.0)
    }

    #[test]
    fn test_profile_point_layout() {
        let profile = build_profile(3, &spec()).unwrap();
        let pts = profile.polygon.vertices();
        // Two per riser, the top, and the two waist points.
        assert_eq!(pts.len(), 2 * 3 + 3);
        assert_eq!(profile.top, Point3d::planar(0.9, 0.6));
        // Reversed: the base waist point comes first, the first nosing last.
        assert_abs_diff_eq!(pts[0], Point3d::planar(profile.base_thickness, 0.0));
        assert_abs_diff_eq!(pts[pts.len() - 1], Point3d::planar(0.0, 0.0));
        assert_abs_diff_eq!(pts[2], profile.top);
    }

    #[test]
    fn test_profile_is_counter_clockwise() {
        let profile = build_profile(5, &spec()).unwrap();
        assert!(profile.polygon.signed_area_xy() > 0.0);
        assert!(profile.polygon.is_simple(1e-9));
    }

    #[test]
    fn test_thicknesses() {
        let profile = build_profile(4, &spec()).unwrap();
        let pitch = (0.3f64 * 0.3 + 0.2 * 0.2).sqrt();
        assert!((profile.landing_thickness - 0.15 * pitch / 0.3).abs() < 1e-12);
        assert!((profile.base_thickness - 0.15 * pitch / 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_underside_is_parallel_to_pitch() {
        let profile = build_profile(6, &spec()).unwrap();
        let pts = profile.polygon.vertices();
        let base = pts[0];
        let cut = pts[1];
        let slope = (cut.y - base.y) / (cut.x - base.x);
        assert!((slope - 0.2 / 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_nosing_shifts_tread_fronts() {
        let nosed = StairFlightSpec { nosing_length: 0.03, ..spec() };
        let profile = build_profile(2, &nosed).unwrap();
        let pts = profile.polygon.vertices();
        assert_abs_diff_eq!(pts[pts.len() - 1], Point3d::planar(0.03, 0.0));
        assert_abs_diff_eq!(pts[pts.len() - 3], Point3d::planar(0.33, 0.2));
        assert!(profile.polygon.is_simple(1e-9));
    }

    #[test]
    fn test_nosing_past_base_cut_is_rejected() {
        // Base cut is 0.15 * hypot(0.3, 0.2) / 0.2 = 0.2704.
        let long = StairFlightSpec { nosing_length: 0.28, ..spec() };
        assert!(long.validate().is_ok());
        assert!(matches!(
            build_profile(10, &long),
            Err(StairError::ParameterOutOfRange { parameter: "nosing_length", .. })
        ));

        let short = StairFlightSpec { nosing_length: 0.27, ..spec() };
        let profile = build_profile(10, &short).unwrap();
        assert!(profile.polygon.is_simple(1e-9));
    }

    #[test]
    fn test_oversized_waist_is_rejected() {
        let thick = StairFlightSpec { waist_thickness: 0.5, ..spec() };
        assert!(matches!(
            build_profile(1, &thick),
            Err(StairError::ParameterOutOfRange { parameter: "waist_thickness", .. })
        ));
    }
}
