use bytemuck::{Pod, Zeroable};

use crate::assets::texture::TextureId;
use crate::components::color::Color4f;
use crate::components::sprite::TextureFilter;
use crate::config::SpriteDefaults;
use crate::core::quad::{Quad2f, QUAD_INDICES};
use crate::error::SpriteError;

/// Geometry for one sprite quad, as produced by `Sprite::render_to_vertices`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteGeometry {
    pub vertices: Quad2f,
    pub tex_coords: Quad2f,
    pub tint: Color4f,
    pub texture: TextureId,
    pub filter: TextureFilter,
}

/// Interleaved vertex for batched upload.
/// 8 floats = 32 bytes stride: position, uv, rgba.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub x: f32,
    pub y: f32,
    pub u: f32,
    pub v: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl QuadVertex {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// A run of consecutive quads sharing one texture and filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRun {
    pub texture: TextureId,
    pub filter: TextureFilter,
    /// First quad in the run.
    pub start: u32,
    /// One past the last quad in the run.
    pub end: u32,
}

/// Batch of sprite quads: interleaved vertices, `u16` indices, and texture
/// runs so the backend can issue one draw per run.
#[derive(Debug)]
pub struct QuadBuffer {
    pub vertices: Vec<QuadVertex>,
    pub indices: Vec<u16>,
    pub runs: Vec<TextureRun>,
}

impl QuadBuffer {
    /// `u16` indices address at most 65536 vertices.
    pub const MAX_QUADS: usize = (u16::MAX as usize + 1) / 4;

    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(quads: usize) -> Self {
        let quads = quads.min(Self::MAX_QUADS);
        Self {
            vertices: Vec::with_capacity(quads * 4),
            indices: Vec::with_capacity(quads * 6),
            runs: Vec::new(),
        }
    }

    /// Buffer sized by [`SpriteDefaults::batch_capacity`].
    pub fn from_defaults(defaults: &SpriteDefaults) -> Self {
        Self::with_capacity(defaults.batch_capacity)
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.runs.clear();
    }

    pub fn quad_count(&self) -> u32 {
        (self.vertices.len() / 4) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append one quad. Extends the current run when the texture and filter match.
    ///
    /// A full buffer is reported as [`SpriteError::InvalidParameter`]: the
    /// caller asked for more quads than `u16` indices can address.
    pub fn push(&mut self, geometry: &SpriteGeometry) -> Result<(), SpriteError> {
        let quad = self.quad_count();
        if quad as usize >= Self::MAX_QUADS {
            return Err(SpriteError::InvalidParameter(format!(
                "quad buffer full ({} quads)",
                Self::MAX_QUADS
            )));
        }

        let base = (quad * 4) as u16;
        let tint = geometry.tint;
        let positions = geometry.vertices.to_array();
        let uvs = geometry.tex_coords.to_array();
        for (p, uv) in positions.iter().zip(uvs.iter()) {
            self.vertices.push(QuadVertex {
                x: p.x,
                y: p.y,
                u: uv.x,
                v: uv.y,
                r: tint.r,
                g: tint.g,
                b: tint.b,
                a: tint.a,
            });
        }
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));

        match self.runs.last_mut() {
            Some(run) if run.texture == geometry.texture && run.filter == geometry.filter => run.end = quad + 1,
            _ => self.runs.push(TextureRun {
                texture: geometry.texture,
                filter: geometry.filter,
                start: quad,
                end: quad + 1,
            }),
        }
        Ok(())
    }

    /// Raw float view of the vertex data for uploads.
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl Default for QuadBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn geometry(texture: u32) -> SpriteGeometry {
        let unit = Quad2f::from_array([Vec2::ZERO, Vec2::X, Vec2::Y, Vec2::ONE]);
        SpriteGeometry {
            vertices: unit,
            tex_coords: unit,
            tint: Color4f::WHITE,
            texture: TextureId(texture),
            filter: TextureFilter::Linear,
        }
    }

    #[test]
    fn quad_vertex_is_8_floats() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), QuadVertex::STRIDE_BYTES);
    }

    #[test]
    fn push_offsets_indices() {
        let mut buf = QuadBuffer::new();
        buf.push(&geometry(0)).unwrap();
        buf.push(&geometry(0)).unwrap();
        assert_eq!(buf.quad_count(), 2);
        assert_eq!(&buf.indices[6..], &[4, 5, 6, 6, 5, 7]);
        assert_eq!(buf.vertex_floats().len(), 8 * QuadVertex::FLOATS);
    }

    #[test]
    fn runs_split_on_texture_change() {
        let mut buf = QuadBuffer::new();
        buf.push(&geometry(0)).unwrap();
        buf.push(&geometry(0)).unwrap();
        buf.push(&geometry(3)).unwrap();
        assert_eq!(buf.runs.len(), 2);
        assert_eq!((buf.runs[0].start, buf.runs[0].end), (0, 2));
        assert_eq!(buf.runs[1].texture, TextureId(3));
        assert_eq!((buf.runs[1].start, buf.runs[1].end), (2, 3));
    }

    #[test]
    fn capacity_is_capped_at_u16_range() {
        let buf = QuadBuffer::with_capacity(usize::MAX / 8);
        assert!(buf.vertices.capacity() >= QuadBuffer::MAX_QUADS * 4);
        let buf = QuadBuffer::from_defaults(&SpriteDefaults::default());
        assert!(buf.indices.capacity() >= 256 * 6);
    }

    #[test]
    fn full_buffer_rejects_push() {
        let mut buf = QuadBuffer::with_capacity(QuadBuffer::MAX_QUADS);
        for _ in 0..QuadBuffer::MAX_QUADS {
            buf.push(&geometry(0)).unwrap();
        }
        assert!(matches!(buf.push(&geometry(0)), Err(SpriteError::InvalidParameter(_))));
        assert_eq!(buf.quad_count() as usize, QuadBuffer::MAX_QUADS);
        assert_eq!(buf.indices.last(), Some(&u16::MAX));
    }

    #[test]
    fn clear_resets_everything() {
        let mut buf = QuadBuffer::new();
        buf.push(&geometry(1)).unwrap();
        buf.clear();
        assert!(buf.is_empty());
        assert!(buf.runs.is_empty());
    }
}
