use nalgebra::{Matrix4, Vector4};
use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// A 4x4 affine transformation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    matrix: Matrix4<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            matrix: Matrix4::new_translation(&nalgebra::Vector3::new(dx, dy, dz)),
        }
    }

    /// Rotation around the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        Self {
            matrix: Matrix4::new_rotation(nalgebra::Vector3::z() * angle),
        }
    }

    /// A frame mapping local X/Y/Z onto the given axes, with the local
    /// origin at `origin`. The axes are used as given.
    pub fn from_axes(origin: Point3d, x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            x_axis.x, y_axis.x, z_axis.x, origin.x,
            x_axis.y, y_axis.y, z_axis.y, origin.y,
            x_axis.z, y_axis.z, z_axis.z, origin.z,
            0.0,      0.0,      0.0,      1.0,
        );
        Self { matrix }
    }

    pub fn origin(&self) -> Point3d {
        self.transform_point(&Point3d::ORIGIN)
    }

    pub fn x_axis(&self) -> Vec3 {
        self.transform_vector(&Vec3::X)
    }

    pub fn y_axis(&self) -> Vec3 {
        self.transform_vector(&Vec3::Y)
    }

    pub fn z_axis(&self) -> Vec3 {
        self.transform_vector(&Vec3::Z)
    }

    /// Transform a point (applies translation).
    pub fn transform_point(&self, p: &Point3d) -> Point3d {
        Point3d::from_na(self.matrix.transform_point(&p.to_na()))
    }

    /// Transform a vector (no translation).
    pub fn transform_vector(&self, v: &Vec3) -> Vec3 {
        Vec3::from_na(self.matrix.transform_vector(&v.to_na()))
    }

    pub fn transform_points(&self, points: &[Point3d]) -> Vec<Point3d> {
        points.iter().map(|p| self.transform_point(p)).collect()
    }

    /// A transform applying `self` first and `next` afterwards.
    pub fn then(&self, next: &Transform) -> Transform {
        Transform {
            matrix: next.matrix * self.matrix,
        }
    }

    /// Compute the inverse transform. Returns None if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Transform { matrix })
    }

    /// Row-major matrix entries.
    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            let values: Vector4<f64> = self.matrix.row(r).transpose();
            row.copy_from_slice(values.as_slice());
        }
        rows
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            min: Point3d::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3d::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point3d]) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.expand_to_include(p);
        }
        bb
    }

    pub fn expand_to_include(&mut self, p: &Point3d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }
}
