use std::sync::Arc;

use glam::UVec2;

use crate::config::SpriteDefaults;
use crate::error::SpriteError;

/// Opaque handle to texture memory owned by the renderer/loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u32);

/// An uploaded texture and its physical (power-of-two) size.
///
/// Sprites hold it through an `Arc`; it is immutable once created.
#[derive(Debug)]
pub struct Texture {
    id: TextureId,
    name: String,
    size: UVec2,
}

impl Texture {
    pub fn new(id: TextureId, name: impl Into<String>, size: UVec2) -> Result<Self, SpriteError> {
        let name = name.into();
        if !size.x.is_power_of_two() || !size.y.is_power_of_two() {
            return Err(SpriteError::InvalidParameter(format!(
                "texture '{name}' must have power-of-two dimensions, got {}x{}",
                size.x, size.y
            )));
        }
        Ok(Self { id, name, size })
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical size in texels.
    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.x
    }

    pub fn height(&self) -> u32 {
        self.size.y
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        log::debug!("texture '{}' ({:?}) released", self.name, self.id);
    }
}

/// Smallest power-of-two texture that holds an image of `size`.
/// Fails when a side is larger than the biggest `u32` power of two.
pub fn padded_texture_size(size: UVec2) -> Result<UVec2, SpriteError> {
    let pad = |side: u32| {
        side.max(1).checked_next_power_of_two().ok_or_else(|| {
            SpriteError::InvalidParameter(format!(
                "image {}x{} is too large to pad to a power of two",
                size.x, size.y
            ))
        })
    };
    Ok(UVec2::new(pad(size.x)?, pad(size.y)?))
}

/// What a provider hands back for a name: the shared texture plus the
/// rectangle the named image occupies inside it.
#[derive(Debug, Clone)]
pub struct ResolvedTexture {
    pub texture: Arc<Texture>,
    /// Top-left texel of the image (zero for a standalone image).
    pub origin: UVec2,
    /// Logical image size in pixels.
    pub image_size: UVec2,
}

impl ResolvedTexture {
    /// The image fills the texture from the top-left corner.
    pub fn whole(texture: Arc<Texture>, image_size: UVec2) -> Self {
        Self {
            texture,
            origin: UVec2::ZERO,
            image_size,
        }
    }

    pub fn texture_size(&self) -> UVec2 {
        self.texture.size()
    }

    /// Image must be non-empty and lie inside the texture.
    pub fn validate(&self) -> Result<(), SpriteError> {
        if self.image_size.x == 0 || self.image_size.y == 0 {
            return Err(SpriteError::InvalidParameter(format!(
                "image in '{}' has zero size",
                self.texture.name()
            )));
        }
        SpriteError::check_region(self.origin, self.image_size, self.texture.size())
    }
}

/// Resolves image names to textures. Loading and decoding happen behind it.
pub trait TextureProvider {
    /// Look up `name`. Fails with [`SpriteError::NotFound`] when there is no such asset.
    fn resolve(&self, name: &str) -> Result<ResolvedTexture, SpriteError>;

    /// Defaults for sprites created through this provider.
    fn defaults(&self) -> SpriteDefaults {
        SpriteDefaults::default()
    }
}
