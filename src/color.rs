//! `#rrggbb` colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid color '{0}': expected #rrggbb")]
    InvalidHex(String),
}

/// An opaque sRGB color written as `#rrggbb`.
///
/// Only the six-digit form is accepted, so every value that reaches the
/// validator or the renderer has three well-defined channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor::rgb(0, 0, 0);
    pub const WHITE: HexColor = HexColor::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Linear interpolation towards `other`, `t` clamped to `[0, 1]`.
    pub fn mix(&self, other: &HexColor, t: f64) -> HexColor {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        HexColor::rgb(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| ColorError::InvalidHex(s.to_string()))?;

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError::InvalidHex(s.to_string()))
        };
        Ok(HexColor::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let c: HexColor = "#6366F1".parse().unwrap();
        assert_eq!(c, HexColor::rgb(0x63, 0x66, 0xf1));
        assert_eq!(c.to_string(), "#6366f1");
    }

    #[test]
    fn test_rejects_other_forms() {
        for bad in ["", "#fff", "000000", "#12345g", "#1234567", "rgb(0,0,0)"] {
            assert!(bad.parse::<HexColor>().is_err(), "{:?}", bad);
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&HexColor::WHITE).unwrap();
        assert_eq!(json, "\"#ffffff\"");
        let back: HexColor = serde_json::from_str("\"#000000\"").unwrap();
        assert_eq!(back, HexColor::BLACK);
        assert!(serde_json::from_str::<HexColor>("\"red\"").is_err());
    }

    #[test]
    fn test_mix() {
        let mid = HexColor::BLACK.mix(&HexColor::WHITE, 0.5);
        assert_eq!(mid, HexColor::rgb(128, 128, 128));
        assert_eq!(HexColor::BLACK.mix(&HexColor::WHITE, 2.0), HexColor::WHITE);
    }
}
