//! Geometry kernel for procedural building elements.
//!
//! Provides the vector/transform/plane math, planar polygons, a convex hull,
//! a half-edge B-Rep store and the sweep-with-voids operator that turns a
//! closed profile into a capped solid.

pub mod body;
pub mod geometry;
pub mod operations;
pub mod topology;
pub mod validation;

pub use body::Body;
pub use geometry::hull::convex_hull;
pub use geometry::plane::Plane;
pub use geometry::point::Point3d;
pub use geometry::polygon::Polygon;
pub use geometry::transform::{BoundingBox, Transform};
pub use geometry::vector::Vec3;
pub use operations::OperationError;

use serde::{Deserialize, Serialize};

/// Global tolerance configuration for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Points closer than this are the same vertex (meters).
    pub coincidence: f64,
    /// Angles smaller than this (radians) are considered zero.
    pub angular: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-6,
            angular: 1e-6,
        }
    }
}

impl Tolerance {
    pub fn points_coincident(&self, a: &Point3d, b: &Point3d) -> bool {
        a.distance_to(b) < self.coincidence
    }

    pub fn is_zero_angle(&self, angle: f64) -> bool {
        angle.abs() < self.angular
    }
}

pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_coincident_within_tolerance() {
        let tol = Tolerance::default();
        let a = Point3d::new(1.0, 2.0, 3.0);
        let b = Point3d::new(1.0 + 1e-8, 2.0, 3.0);
        let c = Point3d::new(1.0 + 1e-3, 2.0, 3.0);
        assert!(tol.points_coincident(&a, &b));
        assert!(!tol.points_coincident(&a, &c));
    }

    #[test]
    fn test_zero_angle() {
        let tol = default_tolerance();
        assert!(tol.is_zero_angle(1e-9));
        assert!(!tol.is_zero_angle(1e-3));
    }
}
