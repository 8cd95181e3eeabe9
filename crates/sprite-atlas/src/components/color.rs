use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};

/// RGBA tint multiplied into the sampled texture colour.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Color4f {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4f {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Every channel clamped to `[0, 1]`; NaN becomes 0.
    pub fn clamped(self) -> Self {
        fn unit(v: f32) -> f32 {
            if v.is_nan() {
                0.0
            } else {
                v.clamp(0.0, 1.0)
            }
        }
        Self::new(unit(self.r), unit(self.g), unit(self.b), unit(self.a))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn is_white(&self) -> bool {
        *self == Self::WHITE
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color4f {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color4f {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// A colour string that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError {
    pub input: String,
    pub reason: &'static str,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid colour '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for ColorParseError {}

/// Turns a textual colour description into a tint.
pub trait ColorParser {
    fn parse(&self, text: &str) -> Result<Color4f, ColorParseError>;
}

/// Accepts `#RRGGBB`, `#RRGGBBAA`, or 3-4 unit floats separated by commas
/// and/or whitespace (`"1.0, 0.5, 0.25"`, `"1 0 0 0.5"`). Alpha defaults to 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardColorParser;

impl StandardColorParser {
    fn parse_hex(&self, text: &str, hex: &str) -> Result<Color4f, ColorParseError> {
        let err = |reason| ColorParseError { input: text.to_string(), reason };
        if !(hex.len() == 6 || hex.len() == 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err("expected 6 or 8 hex digits"));
        }
        let mut channels = [255u8; 4];
        for (i, channel) in channels.iter_mut().enumerate().take(hex.len() / 2) {
            *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| err("bad hex digit"))?;
        }
        let [r, g, b, a] = channels;
        Ok(Color4f::from_rgba8(r, g, b, a))
    }

    fn parse_floats(&self, text: &str) -> Result<Color4f, ColorParseError> {
        let err = |reason| ColorParseError { input: text.to_string(), reason };
        let mut values = Vec::with_capacity(4);
        let parts = text.trim().split(',').flat_map(|field| {
            let words: Vec<&str> = field.split_whitespace().collect();
            // An empty field between commas stays as one empty word.
            if words.is_empty() {
                vec![""]
            } else {
                words
            }
        });
        for part in parts {
            if part.is_empty() {
                return Err(err("empty component"));
            }
            let value: f32 = part.parse().map_err(|_| err("component is not a number"))?;
            if !value.is_finite() {
                return Err(err("component is not finite"));
            }
            values.push(value);
        }
        match values.as_slice() {
            [r, g, b] => Ok(Color4f::new(*r, *g, *b, 1.0)),
            [r, g, b, a] => Ok(Color4f::new(*r, *g, *b, *a)),
            _ => Err(err("expected 3 or 4 components")),
        }
    }
}

impl ColorParser for StandardColorParser {
    fn parse(&self, text: &str) -> Result<Color4f, ColorParseError> {
        let trimmed = text.trim();
        match trimmed.strip_prefix('#') {
            Some(hex) => self.parse_hex(text, hex),
            None => self.parse_floats(text),
        }
    }
}

impl FromStr for Color4f {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StandardColorParser.parse(s)
    }
}
