use serde::Serialize;
use tracing::{debug, instrument};

use crate::geometry::polygon::Polygon;
use crate::topology::brep::*;

/// Result of a topological consistency check on one solid.
#[derive(Debug, Clone, Serialize)]
pub struct TopologyAudit {
    pub euler_valid: bool,
    pub all_faces_closed: bool,
    pub all_edges_two_faced: bool,
    pub faces_planar: bool,
    pub normals_consistent: bool,
    /// Entity counts per shell, in shell order.
    pub counts: Vec<TopologyCounts>,
    pub errors: Vec<TopologyError>,
}

#[derive(Debug, Clone, Serialize)]
pub enum TopologyError {
    EulerViolation {
        shell: ShellId,
        counts: TopologyCounts,
    },
    OpenLoop {
        loop_id: LoopId,
    },
    /// Half-edge with no partner; the shell is not watertight there.
    OpenEdge {
        half_edge: HalfEdgeId,
    },
    HalfEdgeTwinMismatch {
        half_edge: HalfEdgeId,
    },
    FaceNotPlanar {
        face: FaceId,
        distance: f64,
    },
    /// Outer loop winds against the face surface normal.
    FlippedFace {
        face: FaceId,
    },
}

impl TopologyAudit {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check that a solid is a closed, consistently oriented shell of planar faces.
#[instrument(skip(store))]
pub fn audit_solid(store: &EntityStore, solid_id: SolidId) -> TopologyAudit {
    let tolerance = crate::default_tolerance();
    let mut audit = TopologyAudit {
        euler_valid: true,
        all_faces_closed: true,
        all_edges_two_faced: true,
        faces_planar: true,
        normals_consistent: true,
        counts: Vec::new(),
        errors: Vec::new(),
    };

    for &shell_id in &store.solids[solid_id].shells {
        let counts = store.count_topology(shell_id);
        audit.counts.push(counts);
        if !euler_consistent(&counts) {
            audit.euler_valid = false;
            audit.errors.push(TopologyError::EulerViolation {
                shell: shell_id,
                counts,
            });
        }

        for &face_id in &store.shells[shell_id].faces {
            let face = &store.faces[face_id];
            for loop_id in face.loops() {
                if !is_loop_closed(store, loop_id) {
                    audit.all_faces_closed = false;
                    audit.errors.push(TopologyError::OpenLoop { loop_id });
                }
                for &he_id in &store.loops[loop_id].half_edges {
                    if let Some(error) = check_twin(store, he_id) {
                        audit.all_edges_two_faced = false;
                        audit.errors.push(error);
                    }
                }
                let distance = store
                    .loop_points(loop_id)
                    .iter()
                    .map(|p| face.surface.distance_to_point(p).abs())
                    .fold(0.0, f64::max);
                if distance > tolerance.coincidence {
                    audit.faces_planar = false;
                    audit.errors.push(TopologyError::FaceNotPlanar {
                        face: face_id,
                        distance,
                    });
                }
            }

            let winding = Polygon::new(store.loop_points(face.outer_loop))
                .ok()
                .and_then(|p| p.normal());
            let aligned = winding.is_some_and(|n| n.dot(&face.surface.normal) > 0.0);
            if !aligned {
                audit.normals_consistent = false;
                audit.errors.push(TopologyError::FlippedFace { face: face_id });
            }
        }
    }

    debug!(
        valid = audit.is_valid(),
        error_count = audit.errors.len(),
        "topology audit complete"
    );
    audit
}

/// V - E + F - R = 2 - 2G. Without rings the shell must be a sphere; with
/// rings only the parity and upper bound can be checked.
fn euler_consistent(counts: &TopologyCounts) -> bool {
    let reduced = counts.euler_characteristic() - counts.rings as i64;
    if counts.rings == 0 {
        reduced == 2
    } else {
        reduced <= 2 && reduced % 2 == 0
    }
}

fn is_loop_closed(store: &EntityStore, loop_id: LoopId) -> bool {
    let half_edges = &store.loops[loop_id].half_edges;
    if half_edges.len() < 3 {
        return false;
    }
    half_edges.iter().enumerate().all(|(i, &he_id)| {
        let next = half_edges[(i + 1) % half_edges.len()];
        store.half_edges[he_id].end_vertex == store.half_edges[next].start_vertex
    })
}

fn check_twin(store: &EntityStore, he_id: HalfEdgeId) -> Option<TopologyError> {
    let he = &store.half_edges[he_id];
    let Some(twin) = store.half_edges.get(he.twin) else {
        return Some(TopologyError::OpenEdge { half_edge: he_id });
    };
    if he.twin == he_id {
        return Some(TopologyError::OpenEdge { half_edge: he_id });
    }
    let reversed = twin.start_vertex == he.end_vertex && twin.end_vertex == he.start_vertex;
    if twin.twin != he_id || !reversed || twin.edge != he.edge {
        return Some(TopologyError::HalfEdgeTwinMismatch { half_edge: he_id });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vector::Vec3;
    use crate::operations::sweep::sweep_face;

    fn unit_block(store: &mut EntityStore) -> SolidId {
        let square = Polygon::rectangle(1.0, 1.0).vertices().to_vec();
        sweep_face(store, &square, &[], Vec3::Z, 1.0, false).unwrap()
    }

    #[test]
    fn test_block_passes_audit() {
        let mut store = EntityStore::new();
        let solid = unit_block(&mut store);
        let audit = audit_solid(&store, solid);

        assert!(audit.is_valid(), "errors: {:?}", audit.errors);
        assert_eq!(
            audit.counts[0],
            TopologyCounts {
                vertices: 8,
                edges: 12,
                faces: 6,
                rings: 0
            }
        );
    }

    #[test]
    fn test_corrupted_twin_detected() {
        let mut store = EntityStore::new();
        let solid = unit_block(&mut store);
        let he_id = store.half_edges.keys().next().unwrap();
        store.half_edges[he_id].twin = he_id;

        let audit = audit_solid(&store, solid);
        assert!(!audit.all_edges_two_faced);
        assert!(
            audit
                .errors
                .iter()
                .any(|e| matches!(e, TopologyError::OpenEdge { half_edge } if *half_edge == he_id))
        );
    }

    #[test]
    fn test_removed_face_breaks_euler() {
        let mut store = EntityStore::new();
        let solid = unit_block(&mut store);
        let shell = store.solids[solid].shells[0];
        store.shells[shell].faces.pop();

        let audit = audit_solid(&store, solid);
        assert!(!audit.euler_valid);
    }

    #[test]
    fn test_open_loop_detected() {
        let mut store = EntityStore::new();
        let solid = unit_block(&mut store);
        let shell = store.solids[solid].shells[0];
        let face = store.shells[shell].faces[0];
        let loop_id = store.faces[face].outer_loop;
        store.loops[loop_id].half_edges.pop();

        let audit = audit_solid(&store, solid);
        assert!(!audit.all_faces_closed);
    }

    #[test]
    fn test_displaced_vertex_breaks_planarity() {
        let mut store = EntityStore::new();
        let solid = unit_block(&mut store);
        let vertex = store.vertices.keys().next().unwrap();
        store.vertices[vertex].point = store.vertices[vertex].point + Vec3::new(0.0, 0.0, 0.25);

        let audit = audit_solid(&store, solid);
        assert!(!audit.faces_planar);
    }

    #[test]
    fn test_flipped_face_detected() {
        let mut store = EntityStore::new();
        let solid = unit_block(&mut store);
        let shell = store.solids[solid].shells[0];
        let face = store.shells[shell].faces[0];
        let surface = store.faces[face].surface;
        store.faces[face].surface =
            crate::geometry::plane::Plane::new(surface.origin, -surface.normal).unwrap();

        let audit = audit_solid(&store, solid);
        assert!(!audit.normals_consistent);
    }
}
