//! Procedural stair geometry.
//!
//! A [`Stair`] turns one or two walking lines and a set of riser/tread
//! dimensions into swept [`StairFlight`] solids joined by landing
//! [`Floor`] slabs. Geometry comes from `stair-kernel`.

pub mod element;
pub mod error;
pub mod flight;
pub mod floor;
pub mod landing;
pub mod material;
pub mod options;
pub mod stair;
pub mod stair_type;
pub mod walking_line;

pub use element::{AggregateElements, ElementRef, Extrude, HasMaterial, SolidElement};
pub use error::StairError;
pub use flight::StairFlight;
pub use flight::dimensions::StairFlightSpec;
pub use floor::Floor;
pub use landing::build_landing;
pub use material::{Color, Material};
pub use options::{BuildOptions, LandingAlgorithm, WORLD_UP};
pub use stair::Stair;
pub use stair_type::{StairFlightType, StairType, StairTypology};
pub use walking_line::WalkingLine;
