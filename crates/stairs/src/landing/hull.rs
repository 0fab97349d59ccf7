use stair_kernel::{Plane, Point3d, Polygon, convex_hull};
use tracing::debug;

use super::FlightEnd;

/// Landing outline as the convex hull of both flights' end corners and the
/// same corners pushed one flight width onto the landing.
pub(crate) fn landing_outline(top: &FlightEnd, foot: &FlightEnd) -> Vec<Point3d> {
    let ahead = top.direction * top.width;
    let behind = foot.direction * -foot.width;
    let candidates = [
        top.left_corner(),
        top.right_corner(),
        top.left_corner() + ahead,
        top.right_corner() + ahead,
        foot.left_corner(),
        foot.right_corner(),
        foot.left_corner() + behind,
        foot.right_corner() + behind,
    ];

    let mut hull = convex_hull(&candidates, &Plane::horizontal(0.0));
    let upside_down = Polygon::new(hull.clone())
        .ok()
        .and_then(|p| p.normal())
        .is_some_and(|n| n.z < 0.0);
    if upside_down {
        hull.reverse();
    }
    debug!(corners = hull.len(), "landing hull built");
    hull
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::WORLD_UP;
    use stair_kernel::Vec3;

    fn end(point: Point3d, direction: Vec3, width: f64) -> FlightEnd {
        let left = WORLD_UP.cross(&direction);
        FlightEnd {
            point,
            direction,
            left,
            width,
            base_thickness: 0.3,
            left_side: Plane::new(point + left * (width / 2.0), left).unwrap(),
            right_side: Plane::new(point - left * (width / 2.0), left).unwrap(),
        }
    }

    #[test]
    fn test_half_turn_hull_is_rectangle() {
        let top = end(Point3d::ORIGIN, Vec3::X, 1.0);
        let foot = end(Point3d::planar(0.0, 1.2), -Vec3::X, 1.0);
        let hull = landing_outline(&top, &foot);

        assert_eq!(hull.len(), 4);
        let polygon = Polygon::new(hull).unwrap();
        assert!((polygon.signed_area_xy() - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_quarter_turn_hull_is_square() {
        let top = end(Point3d::ORIGIN, Vec3::X, 1.0);
        let foot = end(Point3d::planar(0.5, 0.5), Vec3::Y, 1.0);
        let hull = landing_outline(&top, &foot);

        let polygon = Polygon::new(hull).unwrap();
        assert!((polygon.signed_area_xy() - 1.0).abs() < 1e-9);
    }
}
