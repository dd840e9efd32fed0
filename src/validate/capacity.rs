//! Byte-mode capacity usage.

use serde::Serialize;

use crate::qr::EcLevel;

/// How much of the symbol's capacity a payload uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    /// UTF-8 length of the payload
    pub bytes: usize,
    /// Maximum bytes at the chosen level
    pub max_bytes: usize,
    /// `min(100, round(bytes / max_bytes * 100))`
    pub percent: u8,
}

impl Capacity {
    /// Unrounded, unclamped usage in percent. Thresholds compare against this.
    pub fn exact_percent(&self) -> f64 {
        self.bytes as f64 / self.max_bytes as f64 * 100.0
    }

    pub fn fits(&self) -> bool {
        self.bytes <= self.max_bytes
    }
}

/// Measures `payload` against the capacity of `level`.
pub fn capacity(payload: &str, level: EcLevel) -> Capacity {
    let bytes = payload.len();
    let max_bytes = level.max_bytes();
    let percent = (bytes as f64 / max_bytes as f64 * 100.0).round().min(100.0) as u8;

    Capacity {
        bytes,
        max_bytes,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounding() {
        let cap = capacity(&"a".repeat(2100), EcLevel::M);
        assert_eq!(cap.bytes, 2100);
        assert_eq!(cap.max_bytes, 2331);
        assert_eq!(cap.percent, 90);
        assert!(cap.exact_percent() > 90.0);
    }

    #[test]
    fn test_counts_utf8_bytes() {
        // three bytes per character
        let cap = capacity("日本語", EcLevel::L);
        assert_eq!(cap.bytes, 9);
        assert_eq!(cap.percent, 0);
    }

    #[test]
    fn test_clamped_at_hundred() {
        let cap = capacity(&"a".repeat(5000), EcLevel::H);
        assert_eq!(cap.percent, 100);
        assert!(!cap.fits());
    }

    #[test]
    fn test_empty() {
        let cap = capacity("", EcLevel::M);
        assert_eq!(cap.percent, 0);
        assert!(cap.fits());
    }
}
