use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::geometry::point::Point3d;
use crate::geometry::transform::BoundingBox;
use crate::geometry::vector::Vec3;
use crate::operations::OperationError;
use crate::operations::sweep::sweep_face;
use crate::topology::brep::{EntityStore, SolidId};
use crate::validation::{self, ValidationReport};

/// A single solid together with the store that owns its topology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    store: EntityStore,
    solid: SolidId,
}

impl Body {
    /// Sweep a planar profile (with optional voids) into a solid.
    /// See [`sweep_face`].
    #[instrument(skip(outer, voids))]
    pub fn sweep(
        outer: &[Point3d],
        voids: &[Vec<Point3d>],
        direction: Vec3,
        depth: f64,
        both_sides: bool,
    ) -> Result<Self, OperationError> {
        let mut store = EntityStore::new();
        let solid = sweep_face(&mut store, outer, voids, direction, depth, both_sides)?;
        let body = Self { store, solid };
        info!(
            faces = body.face_count(),
            vertices = body.store.vertices.len(),
            "swept body"
        );
        Ok(body)
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn solid_id(&self) -> SolidId {
        self.solid
    }

    pub fn face_count(&self) -> usize {
        self.store.solid_faces(self.solid).len()
    }

    /// Vertex positions in creation order.
    pub fn vertex_points(&self) -> Vec<Point3d> {
        self.store.vertices.values().map(|v| v.point).collect()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.store.solid_bounding_box(self.solid)
    }

    pub fn volume(&self) -> f64 {
        validation::solid_volume(&self.store, self.solid)
    }

    pub fn surface_area(&self) -> f64 {
        validation::surface_area(&self.store, self.solid)
    }

    pub fn validate(&self) -> ValidationReport {
        validation::validate_solid(&self.store, self.solid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon::Polygon;

    #[test]
    fn test_sweep_body() {
        let profile = Polygon::rectangle(2.0, 1.0).vertices().to_vec();
        let body = Body::sweep(&profile, &[], Vec3::Z, 3.0, false).unwrap();

        assert_eq!(body.face_count(), 6);
        assert_eq!(body.vertex_points().len(), 8);
        assert!((body.volume() - 6.0).abs() < 1e-9);
        let bb = body.bounding_box();
        assert!((bb.size().x - 2.0).abs() < 1e-12);
        assert!((bb.size().z - 3.0).abs() < 1e-12);
        assert!(body.validate().is_valid());
    }

    #[test]
    fn test_sweep_body_propagates_errors() {
        let profile = Polygon::rectangle(2.0, 1.0).vertices().to_vec();
        let err = Body::sweep(&profile, &[], Vec3::Z, -1.0, false).unwrap_err();
        assert!(matches!(err, OperationError::InvalidDimension { .. }));
    }

    #[test]
    fn test_body_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Body>();
    }
}
