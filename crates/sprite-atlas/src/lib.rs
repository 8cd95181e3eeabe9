pub mod assets;
pub mod components;
pub mod config;
pub mod core;
pub mod error;
pub mod renderer;
pub mod systems;

#[cfg(test)]
mod test_support;

// Re-export key types at crate root for convenience
pub use assets::manifest::{AtlasDescriptor, AtlasManifest, ImageDescriptor};
pub use assets::registry::TextureRegistry;
pub use assets::texture::{padded_texture_size, ResolvedTexture, Texture, TextureId, TextureProvider};
pub use components::color::{Color4f, ColorParseError, ColorParser, StandardColorParser};
pub use components::sprite::{Sprite, TextureFilter};
pub use config::SpriteDefaults;
pub use crate::core::geometry::{calculate_tex_coords, calculate_vertices, TexCoordInput, VertexInput};
pub use crate::core::quad::{Quad2f, QUAD_INDICES};
pub use error::SpriteError;
pub use renderer::instance::{QuadBuffer, QuadVertex, SpriteGeometry, TextureRun};
pub use renderer::recording::{RecordedQuad, RecordingRenderer};
pub use renderer::traits::{QuadSubmission, Renderer};
pub use systems::render::build_quad_buffer;
