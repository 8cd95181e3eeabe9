use std::fmt;

use glam::UVec2;

use crate::components::color::ColorParseError;

/// Errors surfaced by sprite construction, setters and render calls.
///
/// None of these are retried inside the crate; the caller decides what to do.
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteError {
    /// The texture provider has no asset under this name.
    NotFound(String),
    /// A sub-region does not fit inside the physical texture.
    OutOfBounds {
        offset: UVec2,
        size: UVec2,
        bounds: UVec2,
    },
    /// A scale, size, colour or percentage was rejected.
    InvalidParameter(String),
    /// The renderer could not accept the submission (e.g. context lost).
    RendererUnavailable(String),
}

impl SpriteError {
    /// Bounds check shared by every sub-region entry point.
    pub(crate) fn check_region(offset: UVec2, size: UVec2, bounds: UVec2) -> Result<(), Self> {
        let end_x = offset.x.checked_add(size.x);
        let end_y = offset.y.checked_add(size.y);
        match (end_x, end_y) {
            (Some(x), Some(y)) if x <= bounds.x && y <= bounds.y => Ok(()),
            _ => Err(Self::OutOfBounds { offset, size, bounds }),
        }
    }
}

impl fmt::Display for SpriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteError::NotFound(name) => write!(f, "no texture asset named '{name}'"),
            SpriteError::OutOfBounds { offset, size, bounds } => write!(
                f,
                "region {}x{} at ({}, {}) exceeds texture bounds {}x{}",
                size.x, size.y, offset.x, offset.y, bounds.x, bounds.y
            ),
            SpriteError::InvalidParameter(e) => write!(f, "invalid parameter: {e}"),
            SpriteError::RendererUnavailable(e) => write!(f, "renderer unavailable: {e}"),
        }
    }
}

impl std::error::Error for SpriteError {}

impl From<ColorParseError> for SpriteError {
    fn from(err: ColorParseError) -> Self {
        SpriteError::InvalidParameter(err.to_string())
    }
}
