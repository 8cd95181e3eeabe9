pub mod geometry;
pub mod quad;
