pub mod color;
pub mod sprite;
