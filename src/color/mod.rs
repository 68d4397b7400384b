pub mod distance;

use crate::error::FilterError;

pub use distance::{ColorKey, distance};

/// Target color for keying.
///
/// Components are conventionally 0..=255 but are not clamped: the C ABI
/// passes them through as plain `i32`s and the distance math is done in
/// floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetColor {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl TargetColor {
    pub const GREEN: TargetColor = TargetColor::new(0, 255, 0);

    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` color (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, FilterError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || FilterError::InvalidHexColor(hex.to_string());
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::from([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }

    /// Format as lowercase `#rrggbb`. Out-of-range components are clamped.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        [
            self.r.clamp(0, 255) as u8,
            self.g.clamp(0, 255) as u8,
            self.b.clamp(0, 255) as u8,
        ]
    }
}

impl Default for TargetColor {
    fn default() -> Self {
        Self::GREEN
    }
}

impl From<[u8; 3]> for TargetColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r as i32, g as i32, b as i32)
    }
}

impl std::str::FromStr for TargetColor {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for TargetColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
