//! Helpers for assembling closed shells out of planar faces.

use std::collections::HashMap;

use super::brep::*;
use crate::geometry::plane::Plane;
use crate::geometry::point::Point3d;
use crate::geometry::vector::Vec3;
use crate::operations::OperationError;

/// Shared edges keyed by their unordered vertex pair.
pub type EdgeMap = HashMap<(VertexId, VertexId), HalfEdgeId>;

/// Insert an empty solid with a single shell.
pub fn new_solid(store: &mut EntityStore) -> (SolidId, ShellId) {
    let solid_id = store.solids.insert(Solid { shells: vec![] });
    let shell_id = store.shells.insert(Shell {
        faces: vec![],
        solid: solid_id,
    });
    store.solids[solid_id].shells.push(shell_id);
    (solid_id, shell_id)
}

pub fn insert_vertices(store: &mut EntityStore, points: &[Point3d]) -> Vec<VertexId> {
    let tolerance = crate::default_tolerance().coincidence;
    points
        .iter()
        .map(|p| {
            store.vertices.insert(Vertex {
                point: *p,
                tolerance,
            })
        })
        .collect()
}

/// Add a planar face bounded by `outer` (counter-clockwise about `normal`)
/// and optional hole rings (clockwise about `normal`).
pub fn add_planar_face(
    store: &mut EntityStore,
    shell_id: ShellId,
    outer: &[VertexId],
    inner: &[Vec<VertexId>],
    normal: Vec3,
    edge_map: &mut EdgeMap,
) -> Result<FaceId, OperationError> {
    let center = {
        let sum = outer
            .iter()
            .fold(Vec3::ZERO, |acc, &v| acc + store.vertices[v].point.to_vec3());
        Point3d::ORIGIN + sum / outer.len() as f64
    };
    let surface = Plane::new(center, normal).ok_or(OperationError::DegenerateProfile {
        reason: "face normal has zero length",
    })?;

    let outer_loop = store.loops.insert(Loop {
        half_edges: vec![],
        face: FaceId::default(),
    });
    let face_id = store.faces.insert(Face {
        surface,
        outer_loop,
        inner_loops: vec![],
        shell: shell_id,
    });
    store.loops[outer_loop].face = face_id;
    store.shells[shell_id].faces.push(face_id);
    close_ring(store, outer, face_id, outer_loop, edge_map);

    for ring in inner {
        let loop_id = store.loops.insert(Loop {
            half_edges: vec![],
            face: face_id,
        });
        store.faces[face_id].inner_loops.push(loop_id);
        close_ring(store, ring, face_id, loop_id, edge_map);
    }

    Ok(face_id)
}

fn close_ring(
    store: &mut EntityStore,
    ring: &[VertexId],
    face_id: FaceId,
    loop_id: LoopId,
    edge_map: &mut EdgeMap,
) {
    for i in 0..ring.len() {
        let next = (i + 1) % ring.len();
        create_face_edge_twinned(store, ring[i], ring[next], face_id, loop_id, edge_map);
    }
}

/// Append a half-edge to a loop, pairing it with the opposite half-edge of
/// an already-built neighbouring face when one exists.
pub(crate) fn create_face_edge_twinned(
    store: &mut EntityStore,
    v_start: VertexId,
    v_end: VertexId,
    face_id: FaceId,
    loop_id: LoopId,
    edge_map: &mut EdgeMap,
) -> HalfEdgeId {
    let edge_key = if v_start < v_end {
        (v_start, v_end)
    } else {
        (v_end, v_start)
    };

    let he_id = store.half_edges.insert(HalfEdge {
        edge: EdgeId::default(),
        twin: HalfEdgeId::default(),
        face: face_id,
        loop_id,
        start_vertex: v_start,
        end_vertex: v_end,
    });
    store.loops[loop_id].half_edges.push(he_id);

    match edge_map.remove(&edge_key) {
        Some(twin_he_id) => {
            let edge_id = store.half_edges[twin_he_id].edge;
            store.half_edges[he_id].twin = twin_he_id;
            store.half_edges[he_id].edge = edge_id;
            store.half_edges[twin_he_id].twin = he_id;
            store.edges[edge_id].half_edges.1 = he_id;
        }
        None => {
            let edge_id = store.edges.insert(Edge {
                half_edges: (he_id, he_id),
                start_vertex: v_start,
                end_vertex: v_end,
            });
            store.half_edges[he_id].edge = edge_id;
            edge_map.insert(edge_key, he_id);
        }
    }

    he_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_faces_share_a_twinned_edge() {
        let mut store = EntityStore::new();
        let (_, shell) = new_solid(&mut store);
        let v = insert_vertices(
            &mut store,
            &[
                Point3d::planar(0.0, 0.0),
                Point3d::planar(1.0, 0.0),
                Point3d::planar(1.0, 1.0),
                Point3d::planar(0.0, 1.0),
            ],
        );
        let mut edges = EdgeMap::new();
        add_planar_face(&mut store, shell, &[v[0], v[1], v[2]], &[], Vec3::Z, &mut edges).unwrap();
        add_planar_face(&mut store, shell, &[v[0], v[2], v[3]], &[], Vec3::Z, &mut edges).unwrap();

        // The diagonal is shared; the four outer edges stay open.
        assert_eq!(store.edges.len(), 5);
        assert_eq!(edges.len(), 4);
        let paired = store
            .half_edges
            .iter()
            .filter(|(id, he)| he.twin != HalfEdgeId::default() && he.twin != *id)
            .count();
        assert_eq!(paired, 2);
    }

    #[test]
    fn test_zero_normal_is_rejected() {
        let mut store = EntityStore::new();
        let (_, shell) = new_solid(&mut store);
        let v = insert_vertices(&mut store, &[Point3d::ORIGIN, Point3d::planar(1.0, 0.0), Point3d::planar(0.0, 1.0)]);
        let mut edges = EdgeMap::new();
        let err = add_planar_face(&mut store, shell, &v, &[], Vec3::ZERO, &mut edges).unwrap_err();
        assert!(matches!(err, OperationError::DegenerateProfile { .. }));
    }
}
