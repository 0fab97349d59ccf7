use crate::topology::brep::*;

/// Enclosed volume of a closed planar-faced solid, by the divergence
/// theorem. Each loop is fanned from its first vertex; hole loops wind the
/// other way and subtract. Negative when the faces point inward.
pub fn solid_volume(store: &EntityStore, solid_id: SolidId) -> f64 {
    let mut six_volume = 0.0;
    for face_id in store.solid_faces(solid_id) {
        for loop_id in store.faces[face_id].loops() {
            let points = store.loop_points(loop_id);
            let Some(apex) = points.first().map(|p| p.to_vec3()) else {
                continue;
            };
            for pair in points[1..].windows(2) {
                six_volume += apex.dot(&pair[0].to_vec3().cross(&pair[1].to_vec3()));
            }
        }
    }
    six_volume / 6.0
}

/// Total area of all faces, holes excluded.
pub fn surface_area(store: &EntityStore, solid_id: SolidId) -> f64 {
    store
        .solid_faces(solid_id)
        .into_iter()
        .map(|face_id| {
            let face = &store.faces[face_id];
            face.loops()
                .map(|loop_id| {
                    let points = store.loop_points(loop_id);
                    let n = points.len();
                    let mut acc = crate::geometry::vector::Vec3::ZERO;
                    for i in 0..n {
                        acc = acc + points[i].to_vec3().cross(&points[(i + 1) % n].to_vec3());
                    }
                    // Signed against the face normal so holes subtract.
                    acc.dot(&face.surface.normal) * 0.5
                })
                .sum::<f64>()
        })
        .sum()
}
