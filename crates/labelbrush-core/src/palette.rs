//! Label palette and color classification.
//!
//! Every annotation kind is bound to exactly one paint color. The palette is
//! closed: painting with any other color is a configuration bug and is
//! reported as [`BrushError::UnknownColorKind`].

use crate::error::{BrushError, BrushResult};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque RGB paint color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaintColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PaintColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> BrushResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || BrushError::InvalidColor(hex.to_string());
        if !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let expand = |s: &str| channel(s).map(|v| v * 17);
                Ok(Self::new(
                    expand(&digits[0..1])?,
                    expand(&digits[1..2])?,
                    expand(&digits[2..3])?,
                ))
            }
            _ => Err(invalid()),
        }
    }

    /// RGBA8 bytes as stored in the raster surface.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for PaintColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for PaintColor {
    type Err = BrushError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for PaintColor {
    type Error = BrushError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<PaintColor> for String {
    fn from(color: PaintColor) -> Self {
        color.to_string()
    }
}

impl From<Color> for PaintColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b)
    }
}

impl From<PaintColor> for Color {
    fn from(color: PaintColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

impl Default for PaintColor {
    fn default() -> Self {
        PALETTE[0]
    }
}

/// The 16 label colors, chosen to stay distinguishable from each other.
pub const PALETTE: [PaintColor; 16] = [
    PaintColor::new(0xf4, 0x43, 0x36),
    PaintColor::new(0xe9, 0x1e, 0x63),
    PaintColor::new(0x9c, 0x27, 0xb0),
    PaintColor::new(0x67, 0x3a, 0xb7),
    PaintColor::new(0x3f, 0x51, 0xb5),
    PaintColor::new(0x21, 0x96, 0xf3),
    PaintColor::new(0x03, 0xa9, 0xf4),
    PaintColor::new(0x00, 0xbc, 0xd4),
    PaintColor::new(0x00, 0x96, 0x88),
    PaintColor::new(0x4c, 0xaf, 0x50),
    PaintColor::new(0x8b, 0xc3, 0x4a),
    PaintColor::new(0xcd, 0xdc, 0x39),
    PaintColor::new(0xff, 0xc1, 0x07),
    PaintColor::new(0xff, 0x98, 0x00),
    PaintColor::new(0xff, 0x57, 0x22),
    PaintColor::new(0x79, 0x55, 0x48),
];

/// Semantic annotation kind, one per palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationKind {
    Red,
    Pink,
    Purple,
    DeepPurple,
    Indigo,
    Blue,
    LightBlue,
    Cyan,
    Teal,
    Green,
    LightGreen,
    Lime,
    Amber,
    Orange,
    DeepOrange,
    Brown,
}

impl AnnotationKind {
    /// All kinds, in palette order.
    pub const ALL: [AnnotationKind; 16] = [
        AnnotationKind::Red,
        AnnotationKind::Pink,
        AnnotationKind::Purple,
        AnnotationKind::DeepPurple,
        AnnotationKind::Indigo,
        AnnotationKind::Blue,
        AnnotationKind::LightBlue,
        AnnotationKind::Cyan,
        AnnotationKind::Teal,
        AnnotationKind::Green,
        AnnotationKind::LightGreen,
        AnnotationKind::Lime,
        AnnotationKind::Amber,
        AnnotationKind::Orange,
        AnnotationKind::DeepOrange,
        AnnotationKind::Brown,
    ];

    /// Paint color bound to this kind.
    pub fn color(self) -> PaintColor {
        PALETTE[self as usize]
    }
}

/// Map a paint color to its annotation kind.
pub fn classify_color(color: PaintColor) -> BrushResult<AnnotationKind> {
    PALETTE
        .iter()
        .position(|c| *c == color)
        .map(|index| AnnotationKind::ALL[index])
        .ok_or(BrushError::UnknownColorKind(color))
}
