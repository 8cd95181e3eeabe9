use serde::{Deserialize, Serialize};

use crate::components::sprite::TextureFilter;

/// Defaults applied when a sprite is created without explicit parameters.
///
/// Usually supplied by the texture provider (see
/// [`TextureProvider::defaults`](crate::assets::texture::TextureProvider::defaults)),
/// optionally read from the `defaults` section of an asset manifest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteDefaults {
    /// Scale multiplier for new sprites (default: 1.0).
    pub scale: f32,
    /// Texture sampling mode for new sprites (default: linear).
    pub filter: TextureFilter,
    /// Whether `render()` treats the stored position as the sprite centre (default: true).
    pub centered: bool,
    /// Initial quad capacity of a [`QuadBuffer`](crate::renderer::instance::QuadBuffer) (default: 256).
    pub batch_capacity: usize,
}

impl Default for SpriteDefaults {
    fn default() -> Self {
        Self {
            scale: 1.0,
            filter: TextureFilter::Linear,
            centered: true,
            batch_capacity: 256,
        }
    }
}

impl SpriteDefaults {
    /// Parse defaults from a JSON object. Missing keys keep their default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unit_scale_linear_centered() {
        let defaults = SpriteDefaults::default();
        assert_eq!(defaults.scale, 1.0);
        assert_eq!(defaults.filter, TextureFilter::Linear);
        assert!(defaults.centered);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let defaults = SpriteDefaults::from_json(r#"{ "filter": "nearest", "scale": 2.0 }"#).unwrap();
        assert_eq!(defaults.filter, TextureFilter::Nearest);
        assert_eq!(defaults.scale, 2.0);
        assert!(defaults.centered);
        assert_eq!(defaults.batch_capacity, 256);
    }
}
