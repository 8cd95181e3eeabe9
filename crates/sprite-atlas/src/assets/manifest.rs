use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::config::SpriteDefaults;

/// Asset manifest describing atlases and the named images packed into them.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasManifest {
    /// Defaults for sprites created from this manifest.
    #[serde(default)]
    pub defaults: SpriteDefaults,
    /// List of texture atlases.
    pub atlases: Vec<AtlasDescriptor>,
    /// Named image lookup: name → atlas index + texel rectangle.
    #[serde(default)]
    pub images: HashMap<String, ImageDescriptor>,
}

/// Describes a single texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "menu_buttons").
    pub name: String,
    /// Relative path to the image file, for the loader.
    #[serde(default)]
    pub path: String,
    /// Physical texture width in texels (power of two).
    pub width: u32,
    /// Physical texture height in texels (power of two).
    pub height: u32,
}

/// Describes a named image within an atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    /// Left edge in texels.
    #[serde(default)]
    pub x: u32,
    /// Top edge in texels.
    #[serde(default)]
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AtlasManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::TextureFilter;

    #[test]
    fn parse_manifest_with_defaults() {
        let json = r#"{
            "defaults": { "filter": "nearest" },
            "atlases": [
                { "name": "menu", "path": "menu.png", "width": 512, "height": 256 }
            ],
            "images": {
                "play_button": { "atlas": 0, "x": 0, "y": 32, "width": 120, "height": 40 }
            }
        }"#;
        let manifest = AtlasManifest::from_json(json).unwrap();
        assert_eq!(manifest.defaults.filter, TextureFilter::Nearest);
        assert_eq!(manifest.defaults.scale, 1.0);

        let button = &manifest.images["play_button"];
        assert_eq!(button.atlas, 0);
        assert_eq!(button.y, 32);
        assert_eq!(button.width, 120);
    }

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "atlases": [
                { "name": "player", "width": 64, "height": 128 }
            ]
        }"#;
        let manifest = AtlasManifest::from_json(json).unwrap();
        assert_eq!(manifest.atlases.len(), 1);
        assert_eq!(manifest.atlases[0].height, 128);
        assert!(manifest.atlases[0].path.is_empty());
        assert!(manifest.images.is_empty());
        assert_eq!(manifest.defaults, SpriteDefaults::default());
    }
}
