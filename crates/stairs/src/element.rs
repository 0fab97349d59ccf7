//! Capabilities shared by the generated building elements.

use stair_kernel::{Body, Polygon, Transform, Vec3};

use crate::flight::StairFlight;
use crate::floor::Floor;
use crate::material::Material;

pub trait HasMaterial {
    fn material(&self) -> &Material;
}

/// An element with swept solid geometry in world coordinates.
pub trait SolidElement {
    fn body(&self) -> &Body;

    /// Local-to-world transform of the element's profile.
    fn transform(&self) -> &Transform;
}

/// An element defined by a planar profile swept along a direction.
/// Profile, voids and direction are in the element's local frame.
pub trait Extrude {
    fn profile(&self) -> &Polygon;

    fn voids(&self) -> &[Polygon] {
        &[]
    }

    fn extrude_direction(&self) -> Vec3;

    fn extrude_depth(&self) -> f64;

    /// Whether the sweep extends half its depth to each side of the profile.
    fn both_sides(&self) -> bool;
}

/// An element composed of other elements.
pub trait AggregateElements {
    /// Children in render/export order.
    fn elements(&self) -> Vec<ElementRef<'_>>;
}

/// Borrowed child of an aggregate.
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Flight(&'a StairFlight),
    Landing(&'a Floor),
}

impl ElementRef<'_> {
    pub fn as_flight(&self) -> Option<&StairFlight> {
        match self {
            ElementRef::Flight(flight) => Some(flight),
            ElementRef::Landing(_) => None,
        }
    }

    pub fn as_landing(&self) -> Option<&Floor> {
        match self {
            ElementRef::Landing(floor) => Some(floor),
            ElementRef::Flight(_) => None,
        }
    }
}

impl SolidElement for ElementRef<'_> {
    fn body(&self) -> &Body {
        match self {
            ElementRef::Flight(flight) => flight.body(),
            ElementRef::Landing(floor) => floor.body(),
        }
    }

    fn transform(&self) -> &Transform {
        match self {
            ElementRef::Flight(flight) => flight.transform(),
            ElementRef::Landing(floor) => floor.transform(),
        }
    }
}

impl HasMaterial for ElementRef<'_> {
    fn material(&self) -> &Material {
        match self {
            ElementRef::Flight(flight) => flight.material(),
            ElementRef::Landing(floor) => floor.material(),
        }
    }
}
