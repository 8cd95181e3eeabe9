use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Index buffer for one quad: two counter-clockwise triangles (Y-up)
/// over the corners in [`Quad2f`] order.
///
/// ```text
///  tl(2) ---- tr(3)
///   |  \       |
///   |    \     |
///  bl(0) ---- br(1)
/// ```
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];

/// Four 2D corners of a sprite quad, in a fixed order:
/// bottom-left, bottom-right, top-left, top-right.
///
/// Used for both vertex positions and texture coordinates.
/// 8 floats = 32 bytes, safe to upload as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Quad2f {
    pub bl: Vec2,
    pub br: Vec2,
    pub tl: Vec2,
    pub tr: Vec2,
}

impl Quad2f {
    pub const FLOATS: usize = 8;

    pub fn from_array(corners: [Vec2; 4]) -> Self {
        let [bl, br, tl, tr] = corners;
        Self { bl, br, tl, tr }
    }

    pub fn to_array(&self) -> [Vec2; 4] {
        [self.bl, self.br, self.tl, self.tr]
    }

    /// Flat `[x0, y0, x1, y1, ...]` view for buffer uploads.
    pub fn as_floats(&self) -> &[f32; 8] {
        bytemuck::cast_ref(self)
    }

    /// Average of the four corners.
    pub fn center(&self) -> Vec2 {
        (self.bl + self.br + self.tl + self.tr) * 0.25
    }

    /// Axis-aligned (min, max) of the corners.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let corners = self.to_array();
        let min = corners.iter().copied().fold(Vec2::splat(f32::INFINITY), Vec2::min);
        let max = corners.iter().copied().fold(Vec2::splat(f32::NEG_INFINITY), Vec2::max);
        (min, max)
    }

    /// Swap the left and right corner pairs.
    pub fn swap_horizontal(self) -> Self {
        Self {
            bl: self.br,
            br: self.bl,
            tl: self.tr,
            tr: self.tl,
        }
    }

    /// Swap the top and bottom corner pairs.
    pub fn swap_vertical(self) -> Self {
        Self {
            bl: self.tl,
            br: self.tr,
            tl: self.bl,
            tr: self.br,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Quad2f {
        Quad2f::from_array([
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        ])
    }

    #[test]
    fn quad_is_8_floats() {
        assert_eq!(std::mem::size_of::<Quad2f>(), 32);
        assert_eq!(unit().as_floats(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn indices_wind_counter_clockwise() {
        let corners = unit().to_array();
        for tri in QUAD_INDICES.chunks(3) {
            let a = corners[tri[0] as usize];
            let b = corners[tri[1] as usize];
            let c = corners[tri[2] as usize];
            assert!((b - a).perp_dot(c - a) > 0.0);
        }
    }

    #[test]
    fn center_and_bounds() {
        let q = unit();
        assert_eq!(q.center(), Vec2::splat(0.5));
        assert_eq!(q.bounds(), (Vec2::ZERO, Vec2::ONE));
    }

    #[test]
    fn swaps_are_involutions() {
        let q = unit();
        assert_eq!(q.swap_horizontal().swap_horizontal(), q);
        assert_eq!(q.swap_vertical().swap_vertical(), q);
        assert_eq!(q.swap_horizontal().bl, Vec2::new(1.0, 0.0));
        assert_eq!(q.swap_vertical().bl, Vec2::new(0.0, 1.0));
    }
}
