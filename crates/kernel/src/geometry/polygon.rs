use serde::{Deserialize, Serialize};

use super::plane::Plane;
use super::point::Point3d;
use super::transform::Transform;
use super::vector::Vec3;
use crate::operations::OperationError;

/// A closed planar polygon. The closing edge from the last vertex back to the
/// first is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Point3d>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point3d>) -> Result<Self, OperationError> {
        if vertices.len() < 3 {
            return Err(OperationError::InsufficientProfile {
                required: 3,
                provided: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    /// Axis-aligned rectangle on the XY plane centered at the origin,
    /// counter-clockwise about +Z.
    pub fn rectangle(width: f64, depth: f64) -> Self {
        let hw = width / 2.0;
        let hd = depth / 2.0;
        Self {
            vertices: vec![
                Point3d::planar(-hw, -hd),
                Point3d::planar(hw, -hd),
                Point3d::planar(hw, hd),
                Point3d::planar(-hw, hd),
            ],
        }
    }

    pub fn vertices(&self) -> &[Point3d] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    pub fn transformed(&self, transform: &Transform) -> Self {
        Self {
            vertices: transform.transform_points(&self.vertices),
        }
    }

    /// Newell's area vector: direction is the winding normal, length is
    /// twice the enclosed area.
    fn newell(&self) -> Vec3 {
        let n = self.vertices.len();
        let mut acc = Vec3::ZERO;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            acc.x += (a.y - b.y) * (a.z + b.z);
            acc.y += (a.z - b.z) * (a.x + b.x);
            acc.z += (a.x - b.x) * (a.y + b.y);
        }
        acc
    }

    /// Unit normal following the right-hand rule over the winding.
    pub fn normal(&self) -> Option<Vec3> {
        self.newell().normalized()
    }

    pub fn area(&self) -> f64 {
        self.newell().length() * 0.5
    }

    /// Signed area of the XY footprint; positive for counter-clockwise.
    pub fn signed_area_xy(&self) -> f64 {
        self.newell().z * 0.5
    }

    pub fn centroid(&self) -> Point3d {
        let n = self.vertices.len() as f64;
        let sum = self
            .vertices
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc + p.to_vec3());
        Point3d::ORIGIN + sum / n
    }

    pub fn is_planar(&self, tolerance: f64) -> bool {
        let Some(normal) = self.normal() else {
            return false;
        };
        let Some(plane) = Plane::new(self.vertices[0], normal) else {
            return false;
        };
        self.vertices
            .iter()
            .all(|p| plane.distance_to_point(p).abs() < tolerance)
    }

    /// True when no two edges touch except consecutive edges at their shared
    /// vertex, and no consecutive edges fold back onto each other.
    pub fn is_simple(&self, tolerance: f64) -> bool {
        let Some(normal) = self.normal() else {
            return false;
        };
        let Some(plane) = Plane::new(self.vertices[0], normal) else {
            return false;
        };
        let uv: Vec<(f64, f64)> = self.vertices.iter().map(|p| plane.parameters_of(p)).collect();
        let n = uv.len();

        for i in 0..n {
            let a0 = uv[i];
            let a1 = uv[(i + 1) % n];
            let a2 = uv[(i + 2) % n];
            // Spike: the next edge doubles back along this one.
            let cross = orient(a0, a1, a2);
            let dot = (a1.0 - a0.0) * (a2.0 - a1.0) + (a1.1 - a0.1) * (a2.1 - a1.1);
            if cross.abs() < tolerance && dot < 0.0 {
                return false;
            }

            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let b0 = uv[j];
                let b1 = uv[(j + 1) % n];
                if segments_touch(a0, a1, b0, b1, tolerance) {
                    return false;
                }
            }
        }
        true
    }
}

fn orient(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

fn on_segment(a: (f64, f64), b: (f64, f64), p: (f64, f64), tolerance: f64) -> bool {
    p.0 >= a.0.min(b.0) - tolerance
        && p.0 <= a.0.max(b.0) + tolerance
        && p.1 >= a.1.min(b.1) - tolerance
        && p.1 <= a.1.max(b.1) + tolerance
}

fn segments_touch(
    a0: (f64, f64),
    a1: (f64, f64),
    b0: (f64, f64),
    b1: (f64, f64),
    tolerance: f64,
) -> bool {
    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);

    let straddles = |p: f64, q: f64| (p > tolerance && q < -tolerance) || (p < -tolerance && q > tolerance);
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    (d1.abs() <= tolerance && on_segment(b0, b1, a0, tolerance))
        || (d2.abs() <= tolerance && on_segment(b0, b1, a1, tolerance))
        || (d3.abs() <= tolerance && on_segment(a0, a1, b0, tolerance))
        || (d4.abs() <= tolerance && on_segment(a0, a1, b1, tolerance))
}

/// Drop every point coincident with an earlier one. Two points are the same
/// vertex when each coordinate differs by less than `tolerance`.
pub fn deduplicate(points: &[Point3d], tolerance: f64) -> Vec<Point3d> {
    use approx::AbsDiffEq;

    let mut kept: Vec<Point3d> = Vec::with_capacity(points.len());
    for p in points {
        if !kept.iter().any(|k| k.abs_diff_eq(p, tolerance)) {
            kept.push(*p);
        }
    }
    kept
}

/// Drop vertices lying on the straight line between their neighbours,
/// repeating until none remain. The ring is treated as closed.
pub fn remove_collinear(points: &[Point3d], tolerance: f64) -> Vec<Point3d> {
    let mut ring = points.to_vec();
    loop {
        let n = ring.len();
        if n < 3 {
            return ring;
        }
        let redundant = (0..n).find(|&i| {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            let chord = next - prev;
            match chord.normalized() {
                Some(dir) => (ring[i] - prev).cross(&dir).length() < tolerance,
                None => true,
            }
        });
        match redundant {
            Some(i) => {
                ring.remove(i);
            }
            None => return ring,
        }
    }
}
