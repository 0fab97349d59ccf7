use serde::{Deserialize, Serialize};
use slotmap::{Key, SlotMap, new_key_type};
use std::collections::HashSet;

use crate::geometry::plane::Plane;
use crate::geometry::point::Point3d;
use crate::geometry::transform::BoundingBox;

// ─── Entity Keys ─────────────────────────────────────────────────────────────

new_key_type! {
    pub struct VertexId;
    pub struct EdgeId;
    pub struct HalfEdgeId;
    pub struct LoopId;
    pub struct FaceId;
    pub struct ShellId;
    pub struct SolidId;
}

// ─── Topological Entities ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    pub point: Point3d,
    pub tolerance: f64,
}

/// A straight edge between two vertices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub half_edges: (HalfEdgeId, HalfEdgeId),
    pub start_vertex: VertexId,
    pub end_vertex: VertexId,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HalfEdge {
    pub edge: EdgeId,
    pub twin: HalfEdgeId,
    pub face: FaceId,
    pub loop_id: LoopId,
    pub start_vertex: VertexId,
    pub end_vertex: VertexId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loop {
    pub half_edges: Vec<HalfEdgeId>,
    pub face: FaceId,
}

/// A planar face. The outer loop winds counter-clockwise about the outward
/// normal; inner loops (holes) wind the other way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    pub surface: Plane,
    pub outer_loop: LoopId,
    pub inner_loops: Vec<LoopId>,
    pub shell: ShellId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shell {
    pub faces: Vec<FaceId>,
    pub solid: SolidId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solid {
    pub shells: Vec<ShellId>,
}

/// Entity counts for one shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopologyCounts {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
    /// Inner loops (holes) across all faces.
    pub rings: usize,
}

impl TopologyCounts {
    /// V - E + F, which is 2 for a closed genus-0 shell without holes.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.faces as i64
    }
}

// ─── Entity Store ────────────────────────────────────────────────────────────

/// Arena-based storage for all topological entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    pub vertices: SlotMap<VertexId, Vertex>,
    pub edges: SlotMap<EdgeId, Edge>,
    pub half_edges: SlotMap<HalfEdgeId, HalfEdge>,
    pub loops: SlotMap<LoopId, Loop>,
    pub faces: SlotMap<FaceId, Face>,
    pub shells: SlotMap<ShellId, Shell>,
    pub solids: SlotMap<SolidId, Solid>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_topology(&self, shell_id: ShellId) -> TopologyCounts {
        let shell = &self.shells[shell_id];
        let mut edge_set = HashSet::new();
        let mut vertex_set = HashSet::new();
        let mut rings = 0;

        for &face_id in &shell.faces {
            let face = &self.faces[face_id];
            rings += face.inner_loops.len();
            for loop_id in face.loops() {
                for &he_id in &self.loops[loop_id].half_edges {
                    let he = &self.half_edges[he_id];
                    edge_set.insert(he.edge.data().as_ffi());
                    vertex_set.insert(he.start_vertex.data().as_ffi());
                    vertex_set.insert(he.end_vertex.data().as_ffi());
                }
            }
        }

        TopologyCounts {
            vertices: vertex_set.len(),
            edges: edge_set.len(),
            faces: shell.faces.len(),
            rings,
        }
    }

    /// Vertex positions of a loop, in traversal order.
    pub fn loop_points(&self, loop_id: LoopId) -> Vec<Point3d> {
        self.loops[loop_id]
            .half_edges
            .iter()
            .map(|&he| self.vertices[self.half_edges[he].start_vertex].point)
            .collect()
    }

    pub fn solid_bounding_box(&self, solid_id: SolidId) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for face_id in self.solid_faces(solid_id) {
            for p in self.loop_points(self.faces[face_id].outer_loop) {
                bb.expand_to_include(&p);
            }
        }
        bb
    }

    pub fn solid_faces(&self, solid_id: SolidId) -> Vec<FaceId> {
        self.solids[solid_id]
            .shells
            .iter()
            .flat_map(|&shell_id| self.shells[shell_id].faces.iter().copied())
            .collect()
    }
}

impl Face {
    /// The outer loop followed by the inner loops.
    pub fn loops(&self) -> impl Iterator<Item = LoopId> + '_ {
        std::iter::once(self.outer_loop).chain(self.inner_loops.iter().copied())
    }
}
