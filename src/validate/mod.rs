//! Capacity and scannability checks.
//!
//! Everything here is a pure function of the payload and the style
//! configuration. Warnings are rebuilt from scratch on every call.

mod capacity;
mod contrast;

pub use capacity::{capacity, Capacity};
pub use contrast::{contrast_ratio, relative_luminance};

use serde::Serialize;

use crate::qr::{EcLevel, QrConfig};

/// Capacity share above which an advisory is raised.
pub const CAPACITY_WARN_PERCENT: f64 = 75.0;

/// Capacity share above which an error-severity advisory is raised.
pub const CAPACITY_ERROR_PERCENT: f64 = 90.0;

/// Contrast ratio below which scanning is likely to fail.
pub const CONTRAST_ERROR_RATIO: f64 = 2.5;

/// Contrast ratio below which scanning may struggle.
pub const CONTRAST_WARN_RATIO: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// An advisory shown next to the preview. Nothing is ever blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub severity: Severity,
    pub message: String,
}

impl Warning {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Computes the warnings for a payload rendered with `config`.
///
/// An empty payload yields a single info message. Otherwise warnings come
/// in a fixed order: capacity, contrast, logo.
pub fn validate(payload: &str, config: &QrConfig) -> Vec<Warning> {
    if payload.is_empty() {
        return vec![Warning::new(
            Severity::Info,
            "Enter content above to preview your QR code.",
        )];
    }

    let mut warnings = Vec::new();
    warnings.extend(capacity_warning(payload, config.error_correction));
    warnings.extend(contrast_warning(config));
    warnings.extend(logo_warning(config.has_logo(), config.error_correction));
    warnings
}

/// Capacity advisory for a payload at the given level, if any.
pub fn capacity_warning(payload: &str, level: EcLevel) -> Option<Warning> {
    let cap = capacity(payload, level);
    let exact = cap.exact_percent();
    let shown = exact.round() as u64;

    if exact > CAPACITY_ERROR_PERCENT {
        Some(Warning::new(
            Severity::Error,
            format!("QR is {}% full — reduce content or lower error correction.", shown),
        ))
    } else if exact > CAPACITY_WARN_PERCENT {
        Some(Warning::new(
            Severity::Warn,
            format!("QR is {}% full — approaching capacity limit.", shown),
        ))
    } else {
        None
    }
}

/// Contrast advisory for the configured colors, if any.
pub fn contrast_warning(config: &QrConfig) -> Option<Warning> {
    let ratio = contrast_ratio(&config.fg_color, &config.bg_color);
    if ratio < CONTRAST_ERROR_RATIO {
        Some(Warning::new(
            Severity::Error,
            "Very low contrast — QR may fail to scan. Use darker foreground or lighter background.",
        ))
    } else if ratio < CONTRAST_WARN_RATIO {
        Some(Warning::new(
            Severity::Warn,
            "Moderate contrast — may struggle in poor lighting.",
        ))
    } else {
        None
    }
}

/// Error-correction advisory when a logo covers part of the symbol.
pub fn logo_warning(has_logo: bool, level: EcLevel) -> Option<Warning> {
    match (has_logo, level) {
        (true, EcLevel::L) => Some(Warning::new(
            Severity::Error,
            "Logo requires error correction H or Q to ensure scannability.",
        )),
        (true, EcLevel::M) => Some(Warning::new(
            Severity::Warn,
            "Consider H or Q error correction when embedding a logo.",
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::color::HexColor;

    fn severities(warnings: &[Warning]) -> Vec<Severity> {
        warnings.iter().map(|w| w.severity).collect()
    }

    #[test]
    fn test_empty_payload_single_info() {
        let config = QrConfig {
            fg_color: HexColor::rgb(0x77, 0x77, 0x77),
            bg_color: HexColor::rgb(0x88, 0x88, 0x88),
            logo: Some(PathBuf::from("logo.png")),
            error_correction: EcLevel::L,
            ..Default::default()
        };
        let warnings = validate("", &config);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Info);
    }

    #[test]
    fn test_clean_config_no_warnings() {
        assert!(validate("https://example.com", &QrConfig::default()).is_empty());
    }

    #[test]
    fn test_capacity_error_at_ninety_percent() {
        let payload = "a".repeat(2100);
        let warnings = validate(&payload, &QrConfig::default());
        assert_eq!(severities(&warnings), vec![Severity::Error]);
        assert!(warnings[0].message.starts_with("QR is 90% full"));
    }

    #[test]
    fn test_capacity_advisory_band() {
        // 1800 / 2331 = 77.2%
        let warning = capacity_warning(&"a".repeat(1800), EcLevel::M).unwrap();
        assert_eq!(warning.severity, Severity::Warn);
        assert_eq!(warning.message, "QR is 77% full — approaching capacity limit.");

        // 954 / 1273 = 74.94%, 955 / 1273 = 75.02%
        assert!(capacity_warning(&"a".repeat(954), EcLevel::H).is_none());
        assert_eq!(
            capacity_warning(&"a".repeat(955), EcLevel::H).unwrap().severity,
            Severity::Warn
        );
    }

    #[test]
    fn test_contrast_thresholds() {
        let low = QrConfig {
            fg_color: HexColor::rgb(0x77, 0x77, 0x77),
            bg_color: HexColor::rgb(0x88, 0x88, 0x88),
            ..Default::default()
        };
        let warning = contrast_warning(&low).unwrap();
        assert_eq!(warning.severity, Severity::Error);

        // #999999 on white is about 2.9:1
        let moderate = QrConfig {
            fg_color: HexColor::rgb(0x99, 0x99, 0x99),
            bg_color: HexColor::WHITE,
            ..Default::default()
        };
        assert_eq!(contrast_warning(&moderate).unwrap().severity, Severity::Warn);

        assert!(contrast_warning(&QrConfig::default()).is_none());
    }

    #[test]
    fn test_logo_levels() {
        assert_eq!(logo_warning(true, EcLevel::L).unwrap().severity, Severity::Error);
        assert_eq!(logo_warning(true, EcLevel::M).unwrap().severity, Severity::Warn);
        assert!(logo_warning(true, EcLevel::Q).is_none());
        assert!(logo_warning(true, EcLevel::H).is_none());
        assert!(logo_warning(false, EcLevel::L).is_none());
    }

    #[test]
    fn test_warning_order() {
        let config = QrConfig {
            fg_color: HexColor::rgb(0x77, 0x77, 0x77),
            bg_color: HexColor::rgb(0x88, 0x88, 0x88),
            logo: Some(PathBuf::from("logo.png")),
            error_correction: EcLevel::L,
            ..Default::default()
        };
        let warnings = validate(&"a".repeat(2300), &config);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].message.starts_with("QR is"));
        assert!(warnings[1].message.contains("contrast"));
        assert!(warnings[2].message.contains("Logo"));
    }
}
