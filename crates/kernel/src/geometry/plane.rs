use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// An infinite plane with an in-plane parameterization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3d,
    pub normal: Vec3,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
}

impl Plane {
    /// Plane through `origin` with the given normal. Returns `None` when the
    /// normal has zero length.
    pub fn new(origin: Point3d, normal: Vec3) -> Option<Self> {
        let normal = normal.normalized()?;
        let seed = if normal.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
        let u_axis = seed.cross(&normal).normalized()?;
        let v_axis = normal.cross(&u_axis);
        Some(Self {
            origin,
            normal,
            u_axis,
            v_axis,
        })
    }

    /// The horizontal plane at elevation `z`, parameterized by world X/Y.
    pub fn horizontal(z: f64) -> Self {
        Self {
            origin: Point3d::new(0.0, 0.0, z),
            normal: Vec3::Z,
            u_axis: Vec3::X,
            v_axis: Vec3::Y,
        }
    }

    /// Signed distance from the plane along its normal.
    pub fn distance_to_point(&self, p: &Point3d) -> f64 {
        (*p - self.origin).dot(&self.normal)
    }

    /// Orthogonal projection of a point onto the plane.
    pub fn project_point(&self, p: &Point3d) -> Point3d {
        *p - self.normal * self.distance_to_point(p)
    }

    /// Directed projection: where the line through `p` along `direction`
    /// meets the plane. `None` when the line runs parallel to the plane.
    pub fn intersect_ray(&self, p: &Point3d, direction: &Vec3) -> Option<Point3d> {
        let denom = direction.dot(&self.normal);
        if denom.abs() < 1e-12 {
            return None;
        }
        let t = (self.origin - *p).dot(&self.normal) / denom;
        Some(*p + *direction * t)
    }

    /// `(u, v)` parameters of a point projected onto the plane.
    pub fn parameters_of(&self, p: &Point3d) -> (f64, f64) {
        let v = *p - self.origin;
        (v.dot(&self.u_axis), v.dot(&self.v_axis))
    }
}
