use super::plane::Plane;
use super::point::Point3d;

/// Convex hull of `points` as seen in `plane`, using Andrew's monotone chain.
///
/// Returns the hull vertices (the original points, not their projections)
/// counter-clockwise about the plane normal, starting from the vertex with
/// the smallest `(u, v)`. Points on a hull edge are dropped. Fewer than three
/// distinct points come back unchanged apart from deduplication.
pub fn convex_hull(points: &[Point3d], plane: &Plane) -> Vec<Point3d> {
    let tolerance = crate::default_tolerance().coincidence;

    let mut indexed: Vec<((f64, f64), Point3d)> =
        points.iter().map(|p| (plane.parameters_of(p), *p)).collect();
    indexed.sort_by(|a, b| {
        a.0 .0
            .total_cmp(&b.0 .0)
            .then_with(|| a.0 .1.total_cmp(&b.0 .1))
    });
    indexed.dedup_by(|a, b| {
        (a.0 .0 - b.0 .0).abs() < tolerance && (a.0 .1 - b.0 .1).abs() < tolerance
    });

    if indexed.len() < 3 {
        return indexed.into_iter().map(|(_, p)| p).collect();
    }

    let turn = |o: (f64, f64), a: (f64, f64), b: (f64, f64)| {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    };

    let mut lower: Vec<((f64, f64), Point3d)> = Vec::new();
    for entry in &indexed {
        while lower.len() >= 2
            && turn(lower[lower.len() - 2].0, lower[lower.len() - 1].0, entry.0) <= tolerance
        {
            lower.pop();
        }
        lower.push(*entry);
    }

    let mut upper: Vec<((f64, f64), Point3d)> = Vec::new();
    for entry in indexed.iter().rev() {
        while upper.len() >= 2
            && turn(upper[upper.len() - 2].0, upper[upper.len() - 1].0, entry.0) <= tolerance
        {
            upper.pop();
        }
        upper.push(*entry);
    }

    // The last point of each chain is the first point of the other.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower.into_iter().map(|(_, p)| p).collect()
}
