pub mod hull;
pub mod plane;
pub mod point;
pub mod polygon;
pub mod transform;
pub mod vector;
