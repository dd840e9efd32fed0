//! QR code reading.
//!
//! Decodes the payload string of a QR code found in an image, used to
//! verify that a rendered style still scans.

use std::path::Path;

use image::DynamicImage;
use rqrr::PreparedImage;
use tracing::debug;

use super::QrError;

/// Reads the first decodable QR code in `image` and returns its payload.
pub fn read_qr(image: &DynamicImage) -> Result<String, QrError> {
    let gray = image.to_luma8();
    let (w, h) = gray.dimensions();
    let mut prepared = PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
        gray.get_pixel(x as u32, y as u32).0[0]
    });

    let grids = prepared.detect_grids();
    if grids.is_empty() {
        return Err(QrError::NoQrCodeFound);
    }
    debug!(grids = grids.len(), "detected QR grids");

    let mut last_error = None;
    for grid in &grids {
        match grid.decode() {
            Ok((_, content)) => return Ok(content),
            Err(e) => last_error = Some(e),
        }
    }

    Err(QrError::QrReadError(format!(
        "Failed to decode QR: {:?}",
        last_error
    )))
}

/// Reads a QR code from an image file and returns its payload.
pub fn read_qr_from_file<P: AsRef<Path>>(path: P) -> Result<String, QrError> {
    let image = image::open(path).map_err(|e| QrError::QrReadError(e.to_string()))?;

    read_qr(&image)
}

#[cfg(test)]
mod tests {
    use super::super::config::{DotStyle, EyeStyle, QrConfig};
    use super::super::generator::{generate_qr, QrFormat};
    use super::*;

    fn scannable() -> QrConfig {
        QrConfig {
            dot_style: DotStyle::Square,
            eye_style: EyeStyle::Square,
            size: 330,
            margin: 60,
            ..Default::default()
        }
    }

    #[test]
    fn test_read_qr_roundtrip() {
        let payload = "WIFI:T:WPA;S:Cafe\\;Guest;P:secret;H:false;;";
        let image = generate_qr(payload, &scannable(), QrFormat::Png)
            .unwrap()
            .into_image()
            .unwrap();

        assert_eq!(read_qr(&image).unwrap(), payload);
    }

    #[test]
    fn test_read_qr_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.png");
        super::super::generate_qr_to_file("https://example.com", &path, &scannable(), None).unwrap();

        assert_eq!(read_qr_from_file(&path).unwrap(), "https://example.com");
    }

    #[test]
    fn test_blank_image_has_no_code() {
        let blank = DynamicImage::new_luma8(120, 120);
        assert!(matches!(read_qr(&blank), Err(QrError::NoQrCodeFound)));
    }
}
