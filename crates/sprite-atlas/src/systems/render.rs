use glam::{UVec2, Vec2};

use crate::components::sprite::{Sprite, VertexKey};
use crate::core::geometry::{calculate_tex_coords, calculate_vertices, TexCoordInput, VertexInput};
use crate::core::quad::Quad2f;
use crate::error::SpriteError;
use crate::renderer::instance::{QuadBuffer, SpriteGeometry};
use crate::renderer::traits::{QuadSubmission, Renderer};

impl Sprite {
    /// Draw at the stored position, using the stored centering mode.
    pub fn render<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<(), SpriteError> {
        self.render_at_point(renderer, self.position, self.centered)
    }

    /// Draw at `point` for this call only; the stored position is untouched.
    pub fn render_at_point<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        point: Vec2,
        centered: bool,
    ) -> Result<(), SpriteError> {
        self.update_geometry(point, centered)?;
        self.submit(renderer, &self.vertices, &self.tex_coords)
    }

    /// Draw a `size` texel rectangle at `offset` in the atlas without
    /// touching the cached geometry; the next `render()` shows this sprite's
    /// own region again.
    pub fn render_sub_image_at_point<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        point: Vec2,
        offset: UVec2,
        size: UVec2,
        centered: bool,
    ) -> Result<(), SpriteError> {
        // Limited by the atlas bounds only, not by this sprite's region.
        let tex_coords = calculate_tex_coords(&TexCoordInput {
            offset,
            size,
            texture_size: self.texture.size(),
            max_extent: Vec2::ONE,
            flip_horizontally: self.flip_horizontally,
            flip_vertically: self.flip_vertically,
        })?;
        let vertices = calculate_vertices(&VertexInput {
            point,
            size: size.as_vec2(),
            scale: self.scale,
            rotation: self.rotation,
            centered,
        })?;
        self.submit(renderer, &vertices, &tex_coords)
    }

    /// Compute and cache geometry for `point` without drawing.
    pub fn render_to_vertices(&mut self, point: Vec2, centered: bool) -> Result<SpriteGeometry, SpriteError> {
        self.update_geometry(point, centered)?;
        Ok(SpriteGeometry {
            vertices: self.vertices,
            tex_coords: self.tex_coords,
            tint: self.colour_filter,
            texture: self.texture.id(),
            filter: self.filter,
        })
    }

    /// Recompute whichever cache is stale. Nothing is written on error.
    fn update_geometry(&mut self, point: Vec2, centered: bool) -> Result<(), SpriteError> {
        let key = VertexKey { point, centered };
        if self.vertices_dirty || self.last_vertex_key != Some(key) {
            self.vertices = calculate_vertices(&VertexInput {
                point,
                size: self.image_size.as_vec2(),
                scale: self.scale,
                rotation: self.rotation,
                centered,
            })?;
            self.last_vertex_key = Some(key);
            self.vertices_dirty = false;
        }

        if self.tex_coords_dirty || self.last_texture_offset != Some(self.texture_offset) {
            self.tex_coords = calculate_tex_coords(&TexCoordInput {
                offset: self.texture_offset,
                size: self.image_size,
                texture_size: self.texture.size(),
                max_extent: self.max_tex,
                flip_horizontally: self.flip_horizontally,
                flip_vertically: self.flip_vertically,
            })?;
            self.last_texture_offset = Some(self.texture_offset);
            self.tex_coords_dirty = false;
        }
        Ok(())
    }

    fn submit<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        vertices: &Quad2f,
        tex_coords: &Quad2f,
    ) -> Result<(), SpriteError> {
        renderer.submit_quad(&QuadSubmission {
            vertices,
            tex_coords,
            indices: &self.indices,
            texture: self.texture.id(),
            tint: self.is_colored.then_some(self.colour_filter),
            filter: self.filter,
        })
    }
}

/// Build a quad buffer from a set of sprites, each at its stored position.
/// Fully transparent sprites are skipped. On error the buffer is left empty.
pub fn build_quad_buffer<'a>(
    sprites: impl Iterator<Item = &'a mut Sprite>,
    buffer: &mut QuadBuffer,
) -> Result<(), SpriteError> {
    buffer.clear();
    let result = fill_quad_buffer(sprites, buffer);
    if result.is_err() {
        buffer.clear();
    }
    result
}

fn fill_quad_buffer<'a>(
    sprites: impl Iterator<Item = &'a mut Sprite>,
    buffer: &mut QuadBuffer,
) -> Result<(), SpriteError> {
    for sprite in sprites {
        if sprite.alpha() <= 0.0 {
            continue;
        }
        let geometry = sprite.render_to_vertices(sprite.position, sprite.centered)?;
        buffer.push(&geometry)?;
    }
    Ok(())
}
