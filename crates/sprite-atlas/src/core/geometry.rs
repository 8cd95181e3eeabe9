//! Sprite geometry: quad vertices and atlas texture coordinates.
//!
//! Textures are padded up to power-of-two sizes, so an image rarely fills its
//! texture. A 48x71 image uploaded into a 64x128 texture only covers
//! `48 / 64 = 0.75` of the U range and `71 / 128 ≈ 0.5547` of the V range:
//!
//! ```text
//!        48px
//!      |------|
//!   -  +------+---+  -
//!   !  |iiiiii|   |  !
//! 71px |iiiiii|   |  ! 128px
//!   -  +------+   |  !
//!      |          |  !
//!      +----------+  -
//!      |----------|
//!          64px
//! ```
//!
//! Those ratios bound every UV this module produces, so padding (or a
//! neighbouring image in a shared atlas) is never sampled.
//!
//! Nothing here touches the GPU; all functions are pure.

use glam::{UVec2, Vec2};

use crate::core::quad::Quad2f;
use crate::error::SpriteError;

/// Inputs for [`calculate_vertices`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexInput {
    /// Anchor: the centre of the quad if `centered`, else its bottom-left corner.
    pub point: Vec2,
    /// Unscaled size in pixels.
    pub size: Vec2,
    /// Uniform scale applied before rotation. Must be positive.
    pub scale: f32,
    /// Counter-clockwise rotation in degrees, about `point`.
    pub rotation: f32,
    pub centered: bool,
}

/// Inputs for [`calculate_tex_coords`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoordInput {
    /// Top-left texel of the region inside the texture.
    pub offset: UVec2,
    /// Region size in texels.
    pub size: UVec2,
    /// Physical texture size.
    pub texture_size: UVec2,
    /// Largest UV extent the region may cover (`image / texture`).
    pub max_extent: Vec2,
    pub flip_horizontally: bool,
    pub flip_vertically: bool,
}

/// Reject non-positive or non-finite scales.
pub fn validate_scale(scale: f32) -> Result<f32, SpriteError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(SpriteError::InvalidParameter(format!("scale must be positive, got {scale}")))
    }
}

/// Wrap any finite angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> Result<f32, SpriteError> {
    if !degrees.is_finite() {
        return Err(SpriteError::InvalidParameter(format!("rotation must be finite, got {degrees}")));
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    Ok(if wrapped >= 360.0 { 0.0 } else { wrapped })
}

/// Build the quad for a sprite of `size` pixels anchored at `point`.
///
/// Extents are scaled first, then rotated about the anchor. With
/// `centered` the quad spans `±size * scale / 2` around `point`;
/// otherwise `point` is the bottom-left corner.
pub fn calculate_vertices(input: &VertexInput) -> Result<Quad2f, SpriteError> {
    let scale = validate_scale(input.scale)?;
    let rotation = normalize_degrees(input.rotation)?;

    let extent = input.size * scale;
    let min = if input.centered { extent * -0.5 } else { Vec2::ZERO };
    let corners = [
        min,
        min + Vec2::new(extent.x, 0.0),
        min + Vec2::new(0.0, extent.y),
        min + extent,
    ];

    let corners = if rotation == 0.0 {
        corners
    } else {
        let rot = Vec2::from_angle(rotation.to_radians());
        corners.map(|c| rot.rotate(c))
    };

    Ok(Quad2f::from_array(corners.map(|c| input.point + c)))
}

/// Map a texel rectangle onto UV space.
///
/// Offsets are measured from the top-left of the texture, so the bottom
/// corners of the quad take the larger V. Flips are applied last and only
/// swap corner pairs.
pub fn calculate_tex_coords(input: &TexCoordInput) -> Result<Quad2f, SpriteError> {
    SpriteError::check_region(input.offset, input.size, input.texture_size)?;

    let texel = input.texture_size.as_vec2().recip();
    let origin = input.offset.as_vec2() * texel;
    let extent = (input.size.as_vec2() * texel).min(input.max_extent);

    let (left, right) = (origin.x, origin.x + extent.x);
    let (top, bottom) = (origin.y, origin.y + extent.y);
    let quad = Quad2f {
        bl: Vec2::new(left, bottom),
        br: Vec2::new(right, bottom),
        tl: Vec2::new(left, top),
        tr: Vec2::new(right, top),
    };

    Ok(apply_flip(quad, input.flip_horizontally, input.flip_vertically))
}

/// Swap UV corner pairs for horizontal and/or vertical flips.
pub fn apply_flip(quad: Quad2f, horizontally: bool, vertically: bool) -> Quad2f {
    let quad = if horizontally { quad.swap_horizontal() } else { quad };
    if vertically {
        quad.swap_vertical()
    } else {
        quad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn close(a: Vec2, b: Vec2) -> bool {
        a.abs_diff_eq(b, EPS)
    }

    fn vertex_input(point: Vec2, centered: bool) -> VertexInput {
        VertexInput {
            point,
            size: Vec2::new(48.0, 71.0),
            scale: 1.0,
            rotation: 0.0,
            centered,
        }
    }

    fn player_tex_input() -> TexCoordInput {
        TexCoordInput {
            offset: UVec2::ZERO,
            size: UVec2::new(48, 71),
            texture_size: UVec2::new(64, 128),
            max_extent: Vec2::new(48.0 / 64.0, 71.0 / 128.0),
            flip_horizontally: false,
            flip_vertically: false,
        }
    }

    #[test]
    fn centered_quad_is_symmetric_around_point() {
        let p = Vec2::new(100.0, 50.0);
        let q = calculate_vertices(&vertex_input(p, true)).unwrap();
        assert!(close(q.center(), p));
        assert!(close(q.bl, p + Vec2::new(-24.0, -35.5)));
        assert!(close(q.tr, p + Vec2::new(24.0, 35.5)));
    }

    #[test]
    fn corner_anchor_puts_point_at_bottom_left() {
        let p = Vec2::new(10.0, 20.0);
        let q = calculate_vertices(&vertex_input(p, false)).unwrap();
        assert_eq!(q.bl, p);
        assert_eq!(q.br, p + Vec2::new(48.0, 0.0));
        assert_eq!(q.tl, p + Vec2::new(0.0, 71.0));
        assert_eq!(q.tr, p + Vec2::new(48.0, 71.0));
    }

    #[test]
    fn scale_multiplies_extents() {
        let mut input = vertex_input(Vec2::ZERO, true);
        input.scale = 2.0;
        let q = calculate_vertices(&input).unwrap();
        assert!(close(q.tr, Vec2::new(48.0, 71.0)));
        assert!(close(q.bl, Vec2::new(-48.0, -71.0)));
    }

    #[test]
    fn rotation_turns_about_the_center() {
        let mut input = vertex_input(Vec2::new(5.0, 5.0), true);
        input.size = Vec2::new(2.0, 2.0);
        input.rotation = 90.0;
        let q = calculate_vertices(&input).unwrap();
        // bottom-left (-1,-1) rotates to (1,-1)
        assert!(close(q.bl, Vec2::new(6.0, 4.0)));
        assert!(close(q.center(), Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn rotation_turns_about_the_corner_when_not_centered() {
        let mut input = vertex_input(Vec2::ZERO, false);
        input.size = Vec2::new(4.0, 2.0);
        input.rotation = 90.0;
        let q = calculate_vertices(&input).unwrap();
        assert_eq!(q.bl, Vec2::ZERO);
        assert!(close(q.br, Vec2::new(0.0, 4.0)));
        assert!(close(q.tl, Vec2::new(-2.0, 0.0)));
    }

    #[test]
    fn full_turn_equals_no_turn() {
        let mut input = vertex_input(Vec2::new(3.0, 4.0), true);
        let base = calculate_vertices(&input).unwrap();
        input.rotation = 360.0;
        assert_eq!(calculate_vertices(&input).unwrap(), base);
        input.rotation = -720.0;
        assert_eq!(calculate_vertices(&input).unwrap(), base);
    }

    #[test]
    fn non_positive_scale_fails() {
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let mut input = vertex_input(Vec2::ZERO, true);
            input.scale = scale;
            assert!(matches!(calculate_vertices(&input), Err(SpriteError::InvalidParameter(_))));
        }
    }

    #[test]
    fn normalize_wraps_into_range() {
        assert_eq!(normalize_degrees(370.0).unwrap(), 10.0);
        assert_eq!(normalize_degrees(-90.0).unwrap(), 270.0);
        assert!(normalize_degrees(f32::NAN).is_err());
        let tiny = normalize_degrees(-1e-10).unwrap();
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn tex_coords_stop_at_image_edge() {
        let q = calculate_tex_coords(&player_tex_input()).unwrap();
        assert!(close(q.tl, Vec2::new(0.0, 0.0)));
        assert!(close(q.tr, Vec2::new(0.75, 0.0)));
        assert!(close(q.bl, Vec2::new(0.0, 0.5547)));
        assert!(close(q.br, Vec2::new(0.75, 0.5547)));
    }

    #[test]
    fn tex_coords_follow_offset() {
        let input = TexCoordInput {
            offset: UVec2::new(32, 64),
            size: UVec2::new(16, 32),
            texture_size: UVec2::new(64, 128),
            max_extent: Vec2::new(0.25, 0.25),
            flip_horizontally: false,
            flip_vertically: false,
        };
        let q = calculate_tex_coords(&input).unwrap();
        assert!(close(q.tl, Vec2::new(0.5, 0.5)));
        assert!(close(q.br, Vec2::new(0.75, 0.75)));
    }

    #[test]
    fn tex_coords_reject_regions_past_the_texture() {
        let mut input = player_tex_input();
        input.size = UVec2::new(64, 129);
        assert!(matches!(
            calculate_tex_coords(&input),
            Err(SpriteError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn horizontal_flip_swaps_only_left_and_right() {
        let plain = calculate_tex_coords(&player_tex_input()).unwrap();
        let mut input = player_tex_input();
        input.flip_horizontally = true;
        let flipped = calculate_tex_coords(&input).unwrap();
        assert_eq!(flipped.bl, plain.br);
        assert_eq!(flipped.br, plain.bl);
        assert_eq!(flipped.tl, plain.tr);
        assert_eq!(flipped.tr, plain.tl);
        assert_eq!(flipped.bl.y, plain.bl.y);
    }

    #[test]
    fn both_flips_swap_both_pairs() {
        let plain = calculate_tex_coords(&player_tex_input()).unwrap();
        let mut input = player_tex_input();
        input.flip_horizontally = true;
        input.flip_vertically = true;
        let flipped = calculate_tex_coords(&input).unwrap();
        assert_eq!(flipped.bl, plain.tr);
        assert_eq!(flipped.tr, plain.bl);
        assert_eq!(flipped.br, plain.tl);
        assert_eq!(flipped.tl, plain.br);
    }
}
