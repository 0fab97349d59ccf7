pub mod brep;
pub mod builder;
