use glam::UVec2;

use crate::assets::registry::TextureRegistry;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The 48x71 player image, padded into a 64x128 texture as `TextureId(0)`.
pub(crate) fn player_registry() -> TextureRegistry {
    let mut registry = TextureRegistry::new();
    registry
        .insert_image("player", UVec2::new(48, 71))
        .expect("player image fits its texture");
    registry
}
