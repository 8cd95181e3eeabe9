//! Renderer contract consumed by sprites.
//!
//! The crate never talks to a GPU API. A backend (OpenGL, wgpu, a software
//! rasterizer) implements [`Renderer`] and receives one [`QuadSubmission`]
//! per draw.

use glam::Vec2;

use crate::assets::texture::TextureId;
use crate::components::color::Color4f;
use crate::components::sprite::TextureFilter;
use crate::core::quad::Quad2f;
use crate::error::SpriteError;

/// Everything a backend needs to draw one textured quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSubmission<'a> {
    /// Corner positions in render-space units.
    pub vertices: &'a Quad2f,
    /// Corner UVs, same corner order as `vertices`.
    pub tex_coords: &'a Quad2f,
    /// Two triangles over the four corners.
    pub indices: &'a [u16; 6],
    pub texture: TextureId,
    /// `None` when the sprite is untinted (opaque white).
    pub tint: Option<Color4f>,
    pub filter: TextureFilter,
}

/// Renderer trait for quad backends.
///
/// # Example Implementation
///
/// ```ignore
/// struct GlRenderer { /* ... */ }
///
/// impl Renderer for GlRenderer {
///     fn submit_quad(&mut self, quad: &QuadSubmission<'_>) -> Result<(), SpriteError> {
///         if self.context_lost() {
///             return Err(SpriteError::RendererUnavailable("context lost".into()));
///         }
///         // bind texture, upload vertices/uvs, draw elements...
///         Ok(())
///     }
///
///     fn viewport_size(&self) -> Vec2 {
///         Vec2::new(self.width as f32, self.height as f32)
///     }
/// }
/// ```
pub trait Renderer {
    /// Draw one quad. Fails with [`SpriteError::RendererUnavailable`] when
    /// the backend cannot accept work right now.
    fn submit_quad(&mut self, quad: &QuadSubmission<'_>) -> Result<(), SpriteError>;

    /// Current viewport size in render-space units.
    fn viewport_size(&self) -> Vec2;
}
