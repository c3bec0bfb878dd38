// src/color.rs

//! Defines the packed 24-bit `Color` used by every canvas in the crate.
//!
//! Colors are stored as `0xRRGGBB` in the low 24 bits of a `u32`, which is the
//! same layout the strip driver expects in its LED buffer. There is no alpha
//! channel; transparency is expressed by comparing against a background key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A packed 24-bit RGB color (`0xRRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const RED: Color = Color(0xFF0000);
    pub const GREEN: Color = Color(0x00FF00);
    pub const BLUE: Color = Color(0x0000FF);
    pub const YELLOW: Color = Color(0xFFFF00);
    pub const CYAN: Color = Color(0x00FFFF);
    pub const MAGENTA: Color = Color(0xFF00FF);

    /// Creates a color from a raw integer, discarding anything above 24 bits.
    pub const fn from_u32(raw: u32) -> Self {
        Color(raw & 0x00FF_FFFF)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// The packed `0xRRGGBB` value.
    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for Color {
    fn from(raw: u32) -> Self {
        Color::from_u32(raw)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn white_is_full_24_bit() {
        assert_eq!(Color::WHITE.to_u32(), 0xFFFFFF);
        assert_eq!(Color::rgb(255, 255, 255), Color::WHITE);
    }

    #[test]
    fn components_round_trip_through_packing() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(c.to_u32(), 0x123456);
        assert_eq!((c.r(), c.g(), c.b()), (0x12, 0x34, 0x56));
    }

    #[test]
    fn raw_values_are_masked_to_24_bits() {
        assert_eq!(Color::from(0xAB00_FF00), Color::GREEN);
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&Color::RED).unwrap();
        assert_eq!(json, "16711680");
        let back: Color = serde_json::from_str("255").unwrap();
        assert_eq!(back, Color::BLUE);
        assert_eq!(Color::RED.to_string(), "#FF0000");
    }
}
