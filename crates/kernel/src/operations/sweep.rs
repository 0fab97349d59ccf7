use tracing::{debug, instrument};

use crate::geometry::point::Point3d;
use crate::geometry::polygon::Polygon;
use crate::geometry::vector::Vec3;
use crate::operations::OperationError;
use crate::topology::brep::*;
use crate::topology::builder::{EdgeMap, add_planar_face, insert_vertices, new_solid};

/// Sweep a planar profile with optional voids along a straight direction,
/// producing a capped solid.
///
/// * `outer` - closed boundary (>= 3 points); either winding is accepted.
/// * `voids` - closed hole boundaries lying inside `outer`.
/// * `direction` - sweep direction; must not lie in the profile plane.
/// * `depth` - sweep length.
/// * `both_sides` - when true the solid extends `depth / 2` to each side of
///   the profile plane instead of `depth` in front of it.
#[instrument(skip(store, outer, voids), fields(points = outer.len(), voids = voids.len()))]
pub fn sweep_face(
    store: &mut EntityStore,
    outer: &[Point3d],
    voids: &[Vec<Point3d>],
    direction: Vec3,
    depth: f64,
    both_sides: bool,
) -> Result<SolidId, OperationError> {
    if !depth.is_finite() || depth <= 0.0 {
        return Err(OperationError::InvalidDimension {
            parameter: "depth",
            value: depth,
        });
    }
    let dir = direction.normalized().ok_or(OperationError::ZeroDirection)?;

    let outer = oriented_ring(outer, dir, true)?;
    let voids = voids
        .iter()
        .map(|ring| oriented_ring(ring, dir, false))
        .collect::<Result<Vec<_>, _>>()?;

    let start_offset = if both_sides { dir * (-depth / 2.0) } else { Vec3::ZERO };
    let extrusion = dir * depth;

    let (solid_id, shell_id) = new_solid(store);
    let mut edge_map = EdgeMap::new();

    let rings: Vec<(Vec<VertexId>, Vec<VertexId>)> = std::iter::once(&outer)
        .chain(voids.iter())
        .map(|ring| {
            let bottom: Vec<Point3d> = ring.iter().map(|p| *p + start_offset).collect();
            let top: Vec<Point3d> = bottom.iter().map(|p| *p + extrusion).collect();
            (insert_vertices(store, &bottom), insert_vertices(store, &top))
        })
        .collect();

    // Bottom cap faces against the sweep.
    let reversed = |ids: &Vec<VertexId>| ids.iter().rev().copied().collect::<Vec<_>>();
    let bottom_holes: Vec<Vec<VertexId>> = rings[1..].iter().map(|(b, _)| reversed(b)).collect();
    add_planar_face(store, shell_id, &reversed(&rings[0].0), &bottom_holes, -dir, &mut edge_map)?;

    let top_holes: Vec<Vec<VertexId>> = rings[1..].iter().map(|(_, t)| t.clone()).collect();
    add_planar_face(store, shell_id, &rings[0].1, &top_holes, dir, &mut edge_map)?;

    for (bottom, top) in &rings {
        let n = bottom.len();
        for i in 0..n {
            let next = (i + 1) % n;
            let edge = store.vertices[bottom[next]].point - store.vertices[bottom[i]].point;
            let normal = edge.cross(&dir).normalized().unwrap_or(Vec3::ZERO);
            add_planar_face(
                store,
                shell_id,
                &[bottom[i], bottom[next], top[next], top[i]],
                &[],
                normal,
                &mut edge_map,
            )?;
        }
    }

    debug!(
        faces = store.shells[shell_id].faces.len(),
        open_edges = edge_map.len(),
        "sweep complete"
    );

    Ok(solid_id)
}

/// Drop repeated consecutive points and wind the ring counter-clockwise
/// (`outer`) or clockwise (holes) about `dir`.
fn oriented_ring(points: &[Point3d], dir: Vec3, outer: bool) -> Result<Vec<Point3d>, OperationError> {
    let tolerance = crate::default_tolerance();

    let mut ring: Vec<Point3d> = Vec::with_capacity(points.len());
    for p in points {
        if ring.last().is_none_or(|last| !tolerance.points_coincident(last, p)) {
            ring.push(*p);
        }
    }
    while ring.len() > 1 && tolerance.points_coincident(&ring[0], &ring[ring.len() - 1]) {
        ring.pop();
    }

    let polygon = Polygon::new(ring)?;
    let normal = polygon.normal().ok_or(OperationError::DegenerateProfile {
        reason: "profile encloses no area",
    })?;
    let alignment = normal.dot(&dir);
    if alignment.abs() < tolerance.angular {
        return Err(OperationError::DegenerateProfile {
            reason: "profile plane contains the sweep direction",
        });
    }

    let ccw = alignment > 0.0;
    Ok(if ccw == outer {
        polygon.vertices().to_vec()
    } else {
        polygon.reversed().vertices().to_vec()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::audit::audit_solid;
    use crate::validation::volume::solid_volume;

    fn rectangle(w: f64, h: f64) -> Vec<Point3d> {
        Polygon::rectangle(w, h).vertices().to_vec()
    }

    #[test]
    fn test_sweep_rectangle_one_side() {
        let mut store = EntityStore::new();
        let solid = sweep_face(&mut store, &rectangle(10.0, 5.0), &[], Vec3::Z, 20.0, false).unwrap();

        assert_eq!(store.solid_faces(solid).len(), 6);
        let bb = store.solid_bounding_box(solid);
        assert!((bb.min.z - 0.0).abs() < 1e-12);
        assert!((bb.max.z - 20.0).abs() < 1e-12);
        assert!((solid_volume(&store, solid) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_both_sides_is_centered() {
        let mut store = EntityStore::new();
        let solid = sweep_face(&mut store, &rectangle(2.0, 2.0), &[], Vec3::Z, 3.0, true).unwrap();

        let bb = store.solid_bounding_box(solid);
        assert!((bb.min.z + 1.5).abs() < 1e-12);
        assert!((bb.max.z - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_clockwise_profile_gives_positive_volume() {
        let mut store = EntityStore::new();
        let mut cw = rectangle(2.0, 3.0);
        cw.reverse();
        let solid = sweep_face(&mut store, &cw, &[], Vec3::Z, 1.0, false).unwrap();
        assert!((solid_volume(&store, solid) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_is_closed_and_twinned() {
        let mut store = EntityStore::new();
        let profile = vec![
            Point3d::planar(0.0, 0.0),
            Point3d::planar(10.0, 0.0),
            Point3d::planar(5.0, 8.66),
        ];
        let solid = sweep_face(&mut store, &profile, &[], Vec3::new(0.0, 1.0, 1.0), 5.0, false).unwrap();

        let audit = audit_solid(&store, solid);
        assert!(audit.is_valid(), "audit errors: {:?}", audit.errors);
        assert_eq!(audit.counts[0].euler_characteristic(), 2);
    }

    #[test]
    fn test_sweep_with_void_subtracts_volume() {
        let mut store = EntityStore::new();
        let hole = rectangle(2.0, 2.0);
        let solid = sweep_face(&mut store, &rectangle(6.0, 4.0), &[hole], Vec3::Z, 0.5, false).unwrap();

        assert!((solid_volume(&store, solid) - (24.0 - 4.0) * 0.5).abs() < 1e-9);
        let audit = audit_solid(&store, solid);
        assert!(audit.is_valid(), "audit errors: {:?}", audit.errors);
        // V - E + F - R = 0 for a single through-hole.
        let counts = audit.counts[0];
        assert_eq!(counts.rings, 2);
        assert_eq!(counts.euler_characteristic() - counts.rings as i64, 0);
    }

    #[test]
    fn test_sweep_drops_repeated_points() {
        let mut store = EntityStore::new();
        let mut profile = rectangle(1.0, 1.0);
        profile.insert(1, profile[1]);
        profile.push(profile[0]);
        let solid = sweep_face(&mut store, &profile, &[], Vec3::Z, 1.0, false).unwrap();
        assert_eq!(store.solid_faces(solid).len(), 6);
    }

    #[test]
    fn test_sweep_rejects_bad_input() {
        let mut store = EntityStore::new();
        let square = rectangle(1.0, 1.0);
        assert!(matches!(
            sweep_face(&mut store, &square, &[], Vec3::Z, 0.0, false),
            Err(OperationError::InvalidDimension { parameter: "depth", .. })
        ));
        assert!(matches!(
            sweep_face(&mut store, &square, &[], Vec3::ZERO, 1.0, false),
            Err(OperationError::ZeroDirection)
        ));
        assert!(matches!(
            sweep_face(&mut store, &square, &[], Vec3::X, 1.0, false),
            Err(OperationError::DegenerateProfile { .. })
        ));
        assert!(matches!(
            sweep_face(&mut store, &square[..2], &[], Vec3::Z, 1.0, false),
            Err(OperationError::InsufficientProfile { .. })
        ));
    }
}
