//! WCAG relative luminance and contrast ratio.

use crate::color::HexColor;

const CHANNEL_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// sRGB channel (0-255) to linear light.
fn linearize(channel: u8) -> f64 {
    let s = channel as f64 / 255.0;
    if s <= 0.03928 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in `[0, 1]`.
pub fn relative_luminance(color: &HexColor) -> f64 {
    color
        .channels()
        .iter()
        .zip(CHANNEL_WEIGHTS)
        .map(|(&c, weight)| linearize(c) * weight)
        .sum()
}

/// Contrast ratio in `[1, 21]`, symmetric in its arguments.
pub fn contrast_ratio(a: &HexColor, b: &HexColor) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> HexColor {
        s.parse().unwrap()
    }

    #[test]
    fn test_black_on_white() {
        let ratio = contrast_ratio(&HexColor::BLACK, &HexColor::WHITE);
        assert!((ratio - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric() {
        let a = hex("#336699");
        let b = hex("#fafafa");
        assert_eq!(contrast_ratio(&a, &b), contrast_ratio(&b, &a));
    }

    #[test]
    fn test_same_color_is_one() {
        let c = hex("#808080");
        assert!((contrast_ratio(&c, &c) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_close_greys_are_low() {
        let ratio = contrast_ratio(&hex("#777777"), &hex("#888888"));
        assert!(ratio < 2.5, "ratio {}", ratio);
    }

    #[test]
    fn test_luminance_bounds() {
        assert_eq!(relative_luminance(&HexColor::BLACK), 0.0);
        assert!((relative_luminance(&HexColor::WHITE) - 1.0).abs() < 1e-9);
    }
}
