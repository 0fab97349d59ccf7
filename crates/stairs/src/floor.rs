use stair_kernel::{Body, Polygon, Transform, Vec3};
use tracing::{info, instrument};

use crate::element::{Extrude, HasMaterial, SolidElement};
use crate::error::StairError;
use crate::material::Material;

/// A horizontal slab swept upward from a profile on its local z = 0 plane.
#[derive(Debug, Clone)]
pub struct Floor {
    profile: Polygon,
    openings: Vec<Polygon>,
    thickness: f64,
    transform: Transform,
    material: Material,
    body: Body,
}

impl Floor {
    pub fn new(
        profile: Polygon,
        thickness: f64,
        transform: Transform,
        material: Material,
    ) -> Result<Self, StairError> {
        Self::with_openings(profile, Vec::new(), thickness, transform, material)
    }

    /// A slab with holes cut through it. Openings must lie inside the
    /// profile and not overlap.
    #[instrument(skip(profile, openings, material), fields(vertices = profile.len(), openings = openings.len()))]
    pub fn with_openings(
        profile: Polygon,
        openings: Vec<Polygon>,
        thickness: f64,
        transform: Transform,
        material: Material,
    ) -> Result<Self, StairError> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(StairError::out_of_range(
                "thickness",
                thickness,
                "must be positive and finite",
            ));
        }

        let outer = profile.transformed(&transform);
        let voids: Vec<_> = openings
            .iter()
            .map(|o| o.transformed(&transform).vertices().to_vec())
            .collect();
        let body = Body::sweep(
            outer.vertices(),
            &voids,
            transform.transform_vector(&Vec3::Z),
            thickness,
            false,
        )?;

        let floor = Self {
            profile,
            openings,
            thickness,
            transform,
            material,
            body,
        };
        info!(
            elevation = floor.elevation(),
            area = floor.area(),
            "floor built"
        );
        Ok(floor)
    }

    pub fn openings(&self) -> &[Polygon] {
        &self.openings
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// World height of the slab's underside.
    pub fn elevation(&self) -> f64 {
        self.transform.origin().z
    }

    /// Profile area less the openings.
    pub fn area(&self) -> f64 {
        self.profile.area() - self.openings.iter().map(Polygon::area).sum::<f64>()
    }

    pub fn profile_transformed(&self) -> Polygon {
        self.profile.transformed(&self.transform)
    }
}

impl Extrude for Floor {
    fn profile(&self) -> &Polygon {
        &self.profile
    }

    fn voids(&self) -> &[Polygon] {
        &self.openings
    }

    fn extrude_direction(&self) -> Vec3 {
        Vec3::Z
    }

    fn extrude_depth(&self) -> f64 {
        self.thickness
    }

    fn both_sides(&self) -> bool {
        false
    }
}

impl SolidElement for Floor {
    fn body(&self) -> &Body {
        &self.body
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl HasMaterial for Floor {
    fn material(&self) -> &Material {
        &self.material
    }
}
