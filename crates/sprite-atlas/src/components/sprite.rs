use std::sync::Arc;

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::assets::texture::{ResolvedTexture, Texture, TextureId, TextureProvider};
use crate::components::color::{Color4f, ColorParser, StandardColorParser};
use crate::core::geometry::{normalize_degrees, validate_scale};
use crate::core::quad::{Quad2f, QUAD_INDICES};
use crate::error::SpriteError;
use crate::renderer::traits::Renderer;

/// Texture sampling mode, fixed per sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureFilter {
    /// Nearest texel; crisp pixel art.
    Nearest,
    /// Bilinear sampling.
    #[default]
    Linear,
}

/// Anchor the cached vertices were built for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VertexKey {
    pub point: Vec2,
    pub centered: bool,
}

/// One drawable view onto a (possibly shared) texture atlas.
///
/// Holds the sub-region it shows, its transform and tint, and caches the
/// quad vertices and texture coordinates between frames. Each cache is
/// invalidated only by the setters that feed it:
///
/// - position / rotation / scale / centering / size → vertices
/// - offset / size / flips → texture coordinates
///
/// Sub-images and copies are independent sprites; they share nothing with
/// their source except the read-only texture.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub(crate) name: String,
    pub(crate) texture: Arc<Texture>,
    pub(crate) image_size: UVec2,
    /// `image_size / texture size`, each in (0, 1].
    pub(crate) max_tex: Vec2,
    pub(crate) texture_offset: UVec2,
    /// Degrees in [0, 360).
    pub(crate) rotation: f32,
    pub(crate) scale: f32,
    pub(crate) position: Vec2,
    pub(crate) centered: bool,
    pub(crate) filter: TextureFilter,
    pub(crate) flip_horizontally: bool,
    pub(crate) flip_vertically: bool,
    pub(crate) colour_filter: Color4f,
    pub(crate) is_colored: bool,
    pub(crate) identifier: u32,
    pub(crate) vertices: Quad2f,
    pub(crate) tex_coords: Quad2f,
    pub(crate) indices: [u16; 6],
    pub(crate) vertices_dirty: bool,
    pub(crate) last_vertex_key: Option<VertexKey>,
    pub(crate) tex_coords_dirty: bool,
    pub(crate) last_texture_offset: Option<UVec2>,
}

fn rejected(err: SpriteError) -> SpriteError {
    log::warn!("sprite: {err}");
    err
}

fn validate_size(size: UVec2) -> Result<UVec2, SpriteError> {
    if size.x == 0 || size.y == 0 {
        return Err(SpriteError::InvalidParameter(format!(
            "image size must be non-zero, got {}x{}",
            size.x, size.y
        )));
    }
    Ok(size)
}

impl Sprite {
    /// Sprite for `name` with the provider's default scale and filter.
    pub fn create<P: TextureProvider + ?Sized>(provider: &P, name: &str) -> Result<Self, SpriteError> {
        let defaults = provider.defaults();
        Self::create_with_scale_and_filter(provider, name, defaults.scale, defaults.filter)
    }

    pub fn create_with_filter<P: TextureProvider + ?Sized>(
        provider: &P,
        name: &str,
        filter: TextureFilter,
    ) -> Result<Self, SpriteError> {
        let defaults = provider.defaults();
        Self::create_with_scale_and_filter(provider, name, defaults.scale, filter)
    }

    pub fn create_with_scale<P: TextureProvider + ?Sized>(
        provider: &P,
        name: &str,
        scale: f32,
    ) -> Result<Self, SpriteError> {
        let defaults = provider.defaults();
        Self::create_with_scale_and_filter(provider, name, scale, defaults.filter)
    }

    pub fn create_with_scale_and_filter<P: TextureProvider + ?Sized>(
        provider: &P,
        name: &str,
        scale: f32,
        filter: TextureFilter,
    ) -> Result<Self, SpriteError> {
        let scale = validate_scale(scale).map_err(rejected)?;
        let resolved = provider.resolve(name)?;
        let mut sprite = Self::from_resolved(name, resolved, scale, filter)?;
        sprite.centered = provider.defaults().centered;
        Ok(sprite)
    }

    /// Build directly from a provider result.
    pub fn from_resolved(
        name: &str,
        resolved: ResolvedTexture,
        scale: f32,
        filter: TextureFilter,
    ) -> Result<Self, SpriteError> {
        resolved.validate()?;
        let scale = validate_scale(scale)?;
        let sprite = Self::build(
            name.to_string(),
            resolved.texture,
            resolved.origin,
            resolved.image_size,
            scale,
            filter,
        );
        log::debug!(
            "sprite '{}' {}x{} at ({}, {}) in {:?}",
            sprite.name,
            sprite.image_size.x,
            sprite.image_size.y,
            sprite.texture_offset.x,
            sprite.texture_offset.y,
            sprite.texture.id()
        );
        Ok(sprite)
    }

    /// Caller has validated the region and scale.
    fn build(
        name: String,
        texture: Arc<Texture>,
        offset: UVec2,
        image_size: UVec2,
        scale: f32,
        filter: TextureFilter,
    ) -> Self {
        let max_tex = image_size.as_vec2() / texture.size().as_vec2();
        Self {
            name,
            texture,
            image_size,
            max_tex,
            texture_offset: offset,
            rotation: 0.0,
            scale,
            position: Vec2::ZERO,
            centered: true,
            filter,
            flip_horizontally: false,
            flip_vertically: false,
            colour_filter: Color4f::WHITE,
            is_colored: false,
            identifier: 0,
            vertices: Quad2f::default(),
            tex_coords: Quad2f::default(),
            indices: QUAD_INDICES,
            vertices_dirty: true,
            last_vertex_key: None,
            tex_coords_dirty: true,
            last_texture_offset: None,
        }
    }

    // ── Sub-images and copies ───────────────────────────────────────────

    /// New sprite showing `width` x `height` texels at `point` in the same
    /// texture, with default rotation and position.
    pub fn sub_image(&self, point: UVec2, width: u32, height: u32, scale: f32) -> Result<Sprite, SpriteError> {
        self.sub_image_with_transform(point, width, height, scale, 0.0, Vec2::ZERO)
    }

    /// Like [`sub_image`](Self::sub_image) with an explicit rotation (degrees) and position.
    pub fn sub_image_with_transform(
        &self,
        point: UVec2,
        width: u32,
        height: u32,
        scale: f32,
        rotation: f32,
        position: Vec2,
    ) -> Result<Sprite, SpriteError> {
        let size = UVec2::new(width, height);
        let checked = validate_size(size)
            .and_then(|_| SpriteError::check_region(point, size, self.texture.size()))
            .and_then(|_| validate_scale(scale))
            .and_then(|scale| normalize_degrees(rotation).map(|rotation| (scale, rotation)));
        let (scale, rotation) = checked.map_err(rejected)?;

        let mut sub = Self::build(self.name.clone(), Arc::clone(&self.texture), point, size, scale, self.filter);
        sub.rotation = rotation;
        sub.position = position;
        sub.centered = self.centered;
        log::debug!(
            "sub-image of '{}': {}x{} at ({}, {})",
            self.name,
            width,
            height,
            point.x,
            point.y
        );
        Ok(sub)
    }

    /// Exact copy of this sprite at a different scale, with its own caches.
    pub fn copy_at_scale(&self, scale: f32) -> Result<Sprite, SpriteError> {
        let scale = validate_scale(scale).map_err(rejected)?;
        let mut copy = self.clone();
        copy.scale = scale;
        copy.invalidate_vertices();
        copy.invalidate_tex_coords();
        Ok(copy)
    }

    // ── Cache invalidation ──────────────────────────────────────────────

    pub(crate) fn invalidate_vertices(&mut self) {
        self.vertices_dirty = true;
    }

    pub(crate) fn invalidate_tex_coords(&mut self) {
        self.tex_coords_dirty = true;
    }

    // ── Transform ───────────────────────────────────────────────────────

    pub fn set_position(&mut self, position: Vec2) {
        if self.position != position {
            self.position = position;
            self.invalidate_vertices();
        }
    }

    /// Rotation in degrees; any finite value, stored wrapped into [0, 360).
    pub fn set_rotation(&mut self, degrees: f32) -> Result<(), SpriteError> {
        let rotation = normalize_degrees(degrees).map_err(rejected)?;
        if self.rotation != rotation {
            self.rotation = rotation;
            self.invalidate_vertices();
        }
        Ok(())
    }

    /// Scale multiplier; must be positive. On error the old scale stays.
    pub fn set_scale(&mut self, scale: f32) -> Result<(), SpriteError> {
        let scale = validate_scale(scale).map_err(rejected)?;
        if self.scale != scale {
            self.scale = scale;
            self.invalidate_vertices();
        }
        Ok(())
    }

    /// Whether `render()` treats the stored position as the centre.
    pub fn set_centered(&mut self, centered: bool) {
        if self.centered != centered {
            self.centered = centered;
            self.invalidate_vertices();
        }
    }

    pub fn set_flip_horizontally(&mut self, flip: bool) {
        if self.flip_horizontally != flip {
            self.flip_horizontally = flip;
            self.invalidate_tex_coords();
        }
    }

    pub fn set_flip_vertically(&mut self, flip: bool) {
        if self.flip_vertically != flip {
            self.flip_vertically = flip;
            self.invalidate_tex_coords();
        }
    }

    /// Move the visible region inside the atlas. Staleness is picked up by
    /// comparing against the offset the cached UVs were built from.
    pub fn set_texture_offset(&mut self, offset: UVec2) -> Result<(), SpriteError> {
        SpriteError::check_region(offset, self.image_size, self.texture.size()).map_err(rejected)?;
        self.texture_offset = offset;
        Ok(())
    }

    /// Resize the visible region. Updates the UV limits and both caches.
    pub fn set_image_size(&mut self, size: UVec2) -> Result<(), SpriteError> {
        validate_size(size)
            .and_then(|size| SpriteError::check_region(self.texture_offset, size, self.texture.size()))
            .map_err(rejected)?;
        if self.image_size != size {
            self.image_size = size;
            self.max_tex = size.as_vec2() / self.texture.size().as_vec2();
            self.invalidate_vertices();
            self.invalidate_tex_coords();
        }
        Ok(())
    }

    pub fn set_identifier(&mut self, identifier: u32) {
        self.identifier = identifier;
    }

    /// Place the sprite at a fraction of the renderer's viewport:
    /// `(0, 0)` is the origin corner, `(1, 1)` the opposite one.
    pub fn set_position_at_screen_percentage<R: Renderer + ?Sized>(
        &mut self,
        percent: Vec2,
        renderer: &R,
    ) -> Result<(), SpriteError> {
        if !percent.is_finite() || percent.min_element() < 0.0 || percent.max_element() > 1.0 {
            return Err(rejected(SpriteError::InvalidParameter(format!(
                "screen percentage must be within [0, 1], got ({}, {})",
                percent.x, percent.y
            ))));
        }
        self.set_position(renderer.viewport_size() * percent);
        Ok(())
    }

    // ── Colour ──────────────────────────────────────────────────────────

    /// Set the tint. Channels are clamped to [0, 1].
    pub fn set_colour_filter(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.set_colour(Color4f::new(r, g, b, a));
    }

    pub fn set_colour(&mut self, colour: Color4f) {
        self.colour_filter = colour.clamped();
        self.is_colored = !self.colour_filter.is_white();
    }

    /// Set the tint from text such as `"#ff8000"` or `"1, 0.5, 0, 1"`.
    pub fn set_colour_from_string(&mut self, text: &str) -> Result<(), SpriteError> {
        self.set_colour_from_string_with(&StandardColorParser, text)
    }

    pub fn set_colour_from_string_with<C: ColorParser + ?Sized>(
        &mut self,
        parser: &C,
        text: &str,
    ) -> Result<(), SpriteError> {
        let colour = parser.parse(text).map_err(|e| rejected(e.into()))?;
        self.set_colour(colour);
        Ok(())
    }

    /// Change only the alpha channel of the tint.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.set_colour(self.colour_filter.with_alpha(alpha));
    }

    pub fn alpha(&self) -> f32 {
        self.colour_filter.a
    }

    pub fn colour_filter(&self) -> Color4f {
        self.colour_filter
    }

    pub fn is_colored(&self) -> bool {
        self.is_colored
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Name the sprite was created from; inherited by sub-images and copies.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    pub fn texture_id(&self) -> TextureId {
        self.texture.id()
    }

    pub fn image_size(&self) -> UVec2 {
        self.image_size
    }

    pub fn image_width(&self) -> u32 {
        self.image_size.x
    }

    pub fn image_height(&self) -> u32 {
        self.image_size.y
    }

    pub fn texture_width(&self) -> u32 {
        self.texture.width()
    }

    pub fn texture_height(&self) -> u32 {
        self.texture.height()
    }

    pub fn max_tex_width(&self) -> f32 {
        self.max_tex.x
    }

    pub fn max_tex_height(&self) -> f32 {
        self.max_tex.y
    }

    /// UV width of one texel.
    pub fn tex_width_ratio(&self) -> f32 {
        1.0 / self.texture.width() as f32
    }

    /// UV height of one texel.
    pub fn tex_height_ratio(&self) -> f32 {
        1.0 / self.texture.height() as f32
    }

    pub fn texture_offset(&self) -> UVec2 {
        self.texture_offset
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn centered(&self) -> bool {
        self.centered
    }

    pub fn filter(&self) -> TextureFilter {
        self.filter
    }

    pub fn flip_horizontally(&self) -> bool {
        self.flip_horizontally
    }

    pub fn flip_vertically(&self) -> bool {
        self.flip_vertically
    }

    pub fn identifier(&self) -> u32 {
        self.identifier
    }

    /// Last computed vertices. Stale until the next render call.
    pub fn vertices(&self) -> &Quad2f {
        &self.vertices
    }

    /// Last computed texture coordinates. Stale until the next render call.
    pub fn tex_coords(&self) -> &Quad2f {
        &self.tex_coords
    }

    pub fn indices(&self) -> &[u16; 6] {
        &self.indices
    }
}
