use serde::{Deserialize, Serialize};
use stair_kernel::{Point3d, Vec3};

use crate::error::StairError;
use crate::options::WORLD_UP;

/// Directed centerline of foot travel up one flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkingLine {
    pub start: Point3d,
    pub end: Point3d,
}

impl WalkingLine {
    pub fn new(start: Point3d, end: Point3d) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Unit direction from start to end, `None` for a zero-length line.
    pub fn direction(&self) -> Option<Vec3> {
        (self.end - self.start).normalized()
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Unit direction of a line a flight can be built on: non-zero length
    /// and not parallel to [`WORLD_UP`].
    pub(crate) fn flight_direction(&self, angular_tolerance: f64) -> Result<Vec3, StairError> {
        let direction = self.direction().ok_or_else(|| StairError::DegenerateWalkingLine {
            reason: format!("start and end coincide at {:?}", self.start),
        })?;
        if direction.cross(&WORLD_UP).length() < angular_tolerance {
            return Err(StairError::DegenerateWalkingLine {
                reason: "walking line is vertical".into(),
            });
        }
        Ok(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_direction() {
        let line = WalkingLine::new(Point3d::ORIGIN, Point3d::planar(3.0, 4.0));
        assert!((line.length() - 5.0).abs() < 1e-12);
        let d = line.direction().unwrap();
        assert!((d.x - 0.6).abs() < 1e-12 && (d.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_translated() {
        let line = WalkingLine::new(Point3d::ORIGIN, Point3d::planar(1.0, 0.0)).translated(Vec3::new(0.0, 0.0, 2.5));
        assert_eq!(line.start, Point3d::new(0.0, 0.0, 2.5));
        assert_eq!(line.end, Point3d::new(1.0, 0.0, 2.5));
    }

    #[test]
    fn test_degenerate_lines_are_rejected() {
        let point = WalkingLine::new(Point3d::planar(1.0, 1.0), Point3d::planar(1.0, 1.0));
        assert!(matches!(
            point.flight_direction(1e-6),
            Err(StairError::DegenerateWalkingLine { .. })
        ));
        let vertical = WalkingLine::new(Point3d::ORIGIN, Point3d::new(0.0, 0.0, 3.0));
        assert!(matches!(
            vertical.flight_direction(1e-6),
            Err(StairError::DegenerateWalkingLine { .. })
        ));
    }
}
