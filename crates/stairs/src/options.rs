use serde::{Deserialize, Serialize};
use stair_kernel::{Tolerance, Vec3};

/// World vertical. Flights climb along it and landings lie perpendicular to it.
pub const WORLD_UP: Vec3 = Vec3::Z;

/// How the polygon joining two flights is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LandingAlgorithm {
    /// Project flight corners onto the side planes of the adjoining flight.
    #[default]
    Projection,
    /// Convex hull of the corner candidates of both flights.
    ConvexHull,
}

/// Construction settings shared by flights, landings and stairs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildOptions {
    pub tolerance: Tolerance,
    pub landing: LandingAlgorithm,
}

impl BuildOptions {
    /// Default settings with hull-stitched landings.
    pub fn convex_hull() -> Self {
        Self {
            landing: LandingAlgorithm::ConvexHull,
            ..Self::default()
        }
    }
}
