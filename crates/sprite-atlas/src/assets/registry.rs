use std::collections::HashMap;
use std::sync::Arc;

use glam::UVec2;

use crate::assets::manifest::AtlasManifest;
use crate::assets::texture::{padded_texture_size, ResolvedTexture, Texture, TextureId, TextureProvider};
use crate::config::SpriteDefaults;
use crate::error::SpriteError;

/// Where a named image lives.
#[derive(Debug, Clone)]
struct ImageEntry {
    atlas: String,
    origin: UVec2,
    size: UVec2,
}

/// Registry of atlases and named images, usable as a [`TextureProvider`].
///
/// Owns one `Arc<Texture>` per atlas; sprites clone it. A texture is
/// released once [`purge_unused`](Self::purge_unused) drops the registry's
/// reference and the last sprite using it is gone.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    defaults: SpriteDefaults,
    atlases: HashMap<String, Arc<Texture>>,
    images: HashMap<String, ImageEntry>,
    next_id: u32,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed manifest. Atlas `i` gets `TextureId(i)`.
    pub fn from_manifest(manifest: &AtlasManifest) -> Result<Self, SpriteError> {
        let mut registry = Self::new().with_defaults(manifest.defaults);
        for desc in &manifest.atlases {
            registry.insert_atlas(&desc.name, UVec2::new(desc.width, desc.height))?;
        }
        for (name, desc) in &manifest.images {
            let atlas = manifest
                .atlases
                .get(desc.atlas as usize)
                .ok_or_else(|| SpriteError::NotFound(format!("atlas #{} for image '{name}'", desc.atlas)))?;
            registry.insert_region(
                name,
                &atlas.name,
                UVec2::new(desc.x, desc.y),
                UVec2::new(desc.width, desc.height),
            )?;
        }
        Ok(registry)
    }

    pub fn with_defaults(mut self, defaults: SpriteDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Register an atlas of the given physical size. Re-registering a name
    /// replaces it; sprites already holding the old texture keep it alive.
    pub fn insert_atlas(&mut self, name: &str, size: UVec2) -> Result<TextureId, SpriteError> {
        let id = TextureId(self.next_id);
        let texture = Texture::new(id, name, size)?;
        self.next_id += 1;
        log::debug!("registered atlas '{name}' {}x{} as {id:?}", size.x, size.y);
        self.atlases.insert(name.to_string(), Arc::new(texture));
        Ok(id)
    }

    /// Name a rectangle inside an existing atlas.
    pub fn insert_region(&mut self, name: &str, atlas: &str, origin: UVec2, size: UVec2) -> Result<(), SpriteError> {
        let texture = self
            .atlases
            .get(atlas)
            .ok_or_else(|| SpriteError::NotFound(atlas.to_string()))?;
        if size.x == 0 || size.y == 0 {
            return Err(SpriteError::InvalidParameter(format!("image '{name}' has zero size")));
        }
        SpriteError::check_region(origin, size, texture.size())?;
        self.images.insert(
            name.to_string(),
            ImageEntry {
                atlas: atlas.to_string(),
                origin,
                size,
            },
        );
        Ok(())
    }

    /// Register a standalone image; its texture is padded to the next power of two.
    pub fn insert_image(&mut self, name: &str, image_size: UVec2) -> Result<TextureId, SpriteError> {
        let id = self.insert_atlas(name, padded_texture_size(image_size)?)?;
        self.insert_region(name, name, UVec2::ZERO, image_size)?;
        Ok(id)
    }

    pub fn texture(&self, atlas: &str) -> Option<&Arc<Texture>> {
        self.atlases.get(atlas)
    }

    pub fn atlas_count(&self) -> usize {
        self.atlases.len()
    }

    /// Drop atlases no sprite references any more, along with their named
    /// images. Returns the released ids so the loader can free GPU memory.
    pub fn purge_unused(&mut self) -> Vec<TextureId> {
        let unused: Vec<String> = self
            .atlases
            .iter()
            .filter(|(_, texture)| Arc::strong_count(texture) == 1)
            .map(|(name, _)| name.clone())
            .collect();

        let mut released = Vec::with_capacity(unused.len());
        for name in unused {
            if let Some(texture) = self.atlases.remove(&name) {
                released.push(texture.id());
            }
            self.images.retain(|_, entry| entry.atlas != name);
        }
        if !released.is_empty() {
            log::debug!("purged {} unused atlas textures", released.len());
        }
        released
    }
}

impl TextureProvider for TextureRegistry {
    fn resolve(&self, name: &str) -> Result<ResolvedTexture, SpriteError> {
        if let Some(entry) = self.images.get(name) {
            let texture = self
                .atlases
                .get(&entry.atlas)
                .ok_or_else(|| SpriteError::NotFound(entry.atlas.clone()))?;
            return Ok(ResolvedTexture {
                texture: Arc::clone(texture),
                origin: entry.origin,
                image_size: entry.size,
            });
        }
        // A bare atlas name resolves to the whole texture.
        self.atlases
            .get(name)
            .map(|texture| ResolvedTexture::whole(Arc::clone(texture), texture.size()))
            .ok_or_else(|| SpriteError::NotFound(name.to_string()))
    }

    fn defaults(&self) -> SpriteDefaults {
        self.defaults
    }
}
