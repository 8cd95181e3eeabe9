use glam::Vec2;

use crate::assets::texture::TextureId;
use crate::components::color::Color4f;
use crate::components::sprite::TextureFilter;
use crate::core::quad::Quad2f;
use crate::error::SpriteError;
use crate::renderer::traits::{QuadSubmission, Renderer};

/// Owned copy of a [`QuadSubmission`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedQuad {
    pub vertices: Quad2f,
    pub tex_coords: Quad2f,
    pub indices: [u16; 6],
    pub texture: TextureId,
    pub tint: Option<Color4f>,
    pub filter: TextureFilter,
}

/// Headless renderer that stores every submitted quad.
///
/// Useful for tests and for tooling that wants sprite geometry without a GPU.
#[derive(Debug)]
pub struct RecordingRenderer {
    viewport: Vec2,
    pub quads: Vec<RecordedQuad>,
    /// When set, every submission fails with `RendererUnavailable`.
    pub unavailable: bool,
}

impl RecordingRenderer {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            quads: Vec::new(),
            unavailable: false,
        }
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn last(&self) -> Option<&RecordedQuad> {
        self.quads.last()
    }

    pub fn clear(&mut self) {
        self.quads.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn submit_quad(&mut self, quad: &QuadSubmission<'_>) -> Result<(), SpriteError> {
        if self.unavailable {
            return Err(SpriteError::RendererUnavailable("recording renderer marked unavailable".into()));
        }
        self.quads.push(RecordedQuad {
            vertices: *quad.vertices,
            tex_coords: *quad.tex_coords,
            indices: *quad.indices,
            texture: quad.texture,
            tint: quad.tint,
            filter: quad.filter,
        });
        Ok(())
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quad::QUAD_INDICES;

    fn submission<'a>(quad: &'a Quad2f) -> QuadSubmission<'a> {
        QuadSubmission {
            vertices: quad,
            tex_coords: quad,
            indices: &QUAD_INDICES,
            texture: TextureId(2),
            tint: None,
            filter: TextureFilter::Nearest,
        }
    }

    #[test]
    fn records_submissions() {
        let quad = Quad2f::default();
        let mut renderer = RecordingRenderer::new(Vec2::new(480.0, 320.0));
        renderer.submit_quad(&submission(&quad)).unwrap();
        assert_eq!(renderer.quads.len(), 1);
        assert_eq!(renderer.last().unwrap().texture, TextureId(2));
        assert_eq!(renderer.viewport_size(), Vec2::new(480.0, 320.0));
    }

    #[test]
    fn unavailable_rejects_and_records_nothing() {
        let quad = Quad2f::default();
        let mut renderer = RecordingRenderer::new(Vec2::ONE);
        renderer.unavailable = true;
        assert!(matches!(
            renderer.submit_quad(&submission(&quad)),
            Err(SpriteError::RendererUnavailable(_))
        ));
        assert!(renderer.quads.is_empty());
    }
}
