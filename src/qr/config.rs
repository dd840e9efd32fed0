//! Style configuration for rendered QR codes.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::QrError;
use crate::color::HexColor;

/// Error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EcLevel {
    /// ~7% recovery, highest capacity.
    L,
    /// ~15% recovery (default).
    #[default]
    M,
    /// ~25% recovery, good with logos.
    Q,
    /// ~30% recovery, best with logos.
    H,
}

impl EcLevel {
    pub const ALL: [EcLevel; 4] = [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H];

    /// Maximum payload in bytes for a version 40 symbol in byte mode.
    pub fn max_bytes(&self) -> usize {
        match self {
            EcLevel::L => 2953,
            EcLevel::M => 2331,
            EcLevel::Q => 1663,
            EcLevel::H => 1273,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EcLevel::L => "7% recovery — higher capacity",
            EcLevel::M => "15% recovery — balanced (default)",
            EcLevel::Q => "25% recovery — good with logos",
            EcLevel::H => "30% recovery — best with logos",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            EcLevel::L => EcLevel::M,
            EcLevel::M => EcLevel::Q,
            EcLevel::Q => EcLevel::H,
            EcLevel::H => EcLevel::L,
        }
    }

    pub(crate) fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        };
        f.write_str(s)
    }
}

impl FromStr for EcLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(EcLevel::L),
            "M" => Ok(EcLevel::M),
            "Q" => Ok(EcLevel::Q),
            "H" => Ok(EcLevel::H),
            _ => Err(QrError::InvalidOption {
                option: "error correction",
                value: s.to_string(),
            }),
        }
    }
}

/// Shape of the data modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DotStyle {
    Square,
    #[default]
    Rounded,
    Dots,
    Classy,
    ClassyRounded,
    ExtraRounded,
}

impl DotStyle {
    pub const ALL: [DotStyle; 6] = [
        DotStyle::Square,
        DotStyle::Rounded,
        DotStyle::Dots,
        DotStyle::Classy,
        DotStyle::ClassyRounded,
        DotStyle::ExtraRounded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DotStyle::Square => "square",
            DotStyle::Rounded => "rounded",
            DotStyle::Dots => "dots",
            DotStyle::Classy => "classy",
            DotStyle::ClassyRounded => "classy-rounded",
            DotStyle::ExtraRounded => "extra-rounded",
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl FromStr for DotStyle {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DotStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| QrError::InvalidOption {
                option: "dot style",
                value: s.to_string(),
            })
    }
}

/// Shape of the three finder patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EyeStyle {
    Square,
    #[default]
    ExtraRounded,
    Dot,
}

impl EyeStyle {
    pub const ALL: [EyeStyle; 3] = [EyeStyle::Square, EyeStyle::ExtraRounded, EyeStyle::Dot];

    pub fn as_str(&self) -> &'static str {
        match self {
            EyeStyle::Square => "square",
            EyeStyle::ExtraRounded => "extra-rounded",
            EyeStyle::Dot => "dot",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            EyeStyle::Square => EyeStyle::ExtraRounded,
            EyeStyle::ExtraRounded => EyeStyle::Dot,
            EyeStyle::Dot => EyeStyle::Square,
        }
    }
}

impl FromStr for EyeStyle {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EyeStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| QrError::InvalidOption {
                option: "eye style",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    #[default]
    Linear,
    Radial,
}

/// Default canvas size in pixels.
pub const DEFAULT_SIZE: u32 = 300;

/// Default margin around the symbol in pixels.
pub const DEFAULT_MARGIN: u32 = 10;

/// Configuration for QR code rendering.
///
/// Serialized with the same camelCase keys the history format uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QrConfig {
    /// Error correction level (default: Medium)
    pub error_correction: EcLevel,
    pub dot_style: DotStyle,
    pub eye_style: EyeStyle,
    /// Dot and eye color
    pub fg_color: HexColor,
    pub bg_color: HexColor,
    /// Whether dots fade from `fg_color` to `gradient_color2`
    pub gradient: bool,
    pub gradient_color2: HexColor,
    pub gradient_type: GradientType,
    /// Image drawn over the center of the symbol
    pub logo: Option<PathBuf>,
    /// Canvas width and height in pixels
    pub size: u32,
    /// Quiet margin in pixels
    pub margin: u32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            error_correction: EcLevel::M,
            dot_style: DotStyle::Rounded,
            eye_style: EyeStyle::ExtraRounded,
            fg_color: HexColor::BLACK,
            bg_color: HexColor::WHITE,
            gradient: false,
            gradient_color2: HexColor::rgb(0x63, 0x66, 0xf1),
            gradient_type: GradientType::Linear,
            logo: None,
            size: DEFAULT_SIZE,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl QrConfig {
    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacities() {
        assert_eq!(EcLevel::L.max_bytes(), 2953);
        assert_eq!(EcLevel::M.max_bytes(), 2331);
        assert_eq!(EcLevel::Q.max_bytes(), 1663);
        assert_eq!(EcLevel::H.max_bytes(), 1273);
    }

    #[test]
    fn test_parse_options() {
        assert_eq!("q".parse::<EcLevel>().unwrap(), EcLevel::Q);
        assert!("X".parse::<EcLevel>().is_err());
        assert_eq!("classy-rounded".parse::<DotStyle>().unwrap(), DotStyle::ClassyRounded);
        assert_eq!("Dot".parse::<EyeStyle>().unwrap(), EyeStyle::Dot);
        assert!("hexagon".parse::<DotStyle>().is_err());
    }

    #[test]
    fn test_config_json_keys() {
        let json = serde_json::to_value(QrConfig::default()).unwrap();
        assert_eq!(json["errorCorrection"], "M");
        assert_eq!(json["dotStyle"], "rounded");
        assert_eq!(json["eyeStyle"], "extra-rounded");
        assert_eq!(json["fgColor"], "#000000");
        assert_eq!(json["gradientColor2"], "#6366f1");
        assert_eq!(json["size"], 300);
    }

    #[test]
    fn test_config_partial_json() {
        let config: QrConfig = serde_json::from_str(r##"{"errorCorrection":"H","bgColor":"#fafafa"}"##).unwrap();
        assert_eq!(config.error_correction, EcLevel::H);
        assert_eq!(config.bg_color, HexColor::rgb(0xfa, 0xfa, 0xfa));
        assert_eq!(config.margin, DEFAULT_MARGIN);
    }
}
