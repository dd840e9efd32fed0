//! QR code generation from payload strings.
//!
//! Produces styled SVG and PNG output plus a compact text rendering for
//! terminals.

use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};
use qrcode::render::unicode;
use qrcode::types::QrError as MatrixError;
use qrcode::{QrCode, Version};
use tracing::debug;

use super::config::{EcLevel, GradientType, QrConfig};
use super::shape::{dot_shape, eye_origins, is_eye_module, Eye};
use super::QrError;
use crate::color::HexColor;

/// Drawn instead of an empty payload so previews always show a symbol.
pub const PLACEHOLDER: &str = "QR Studio";

/// Edge length of exported PNG files.
pub const EXPORT_PNG_SIZE: u32 = 1200;

/// Share of the symbol a logo may cover.
const LOGO_SCALE: f64 = 0.3;

/// Clear space around a logo in pixels.
const LOGO_MARGIN: f64 = 5.0;

const THUMBNAIL_SIZE: u32 = 80;
const THUMBNAIL_MARGIN: u32 = 2;

/// Output format for QR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrFormat {
    /// PNG image
    Png,
    /// SVG vector image (default)
    #[default]
    Svg,
    /// Unicode blocks (for terminal display)
    Ascii,
}

impl QrFormat {
    /// Picks a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl FromStr for QrFormat {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(QrFormat::Png),
            "svg" => Ok(QrFormat::Svg),
            "ascii" | "txt" | "text" => Ok(QrFormat::Ascii),
            _ => Err(QrError::UnknownFormat(s.to_string())),
        }
    }
}

/// Output from QR code generation.
pub enum QrOutput {
    /// PNG/image output
    Image(DynamicImage),
    /// SVG string output
    Svg(String),
    /// Terminal text output
    Ascii(String),
}

impl QrOutput {
    /// Returns true if this is an image output.
    pub fn is_image(&self) -> bool {
        matches!(self, QrOutput::Image(_))
    }

    /// Returns the image if this is an image output.
    pub fn into_image(self) -> Option<DynamicImage> {
        match self {
            QrOutput::Image(img) => Some(img),
            _ => None,
        }
    }

    /// Returns the string content (for SVG or text).
    pub fn as_string(&self) -> Option<&str> {
        match self {
            QrOutput::Svg(s) | QrOutput::Ascii(s) => Some(s),
            _ => None,
        }
    }
}

/// Version and size of the symbol a payload needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolInfo {
    /// QR version (1-40)
    pub version: i16,
    /// Modules per side
    pub modules: usize,
}

/// The dark/light modules of a symbol, without quiet zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    width: usize,
    dark: Vec<bool>,
}

impl ModuleGrid {
    fn build(payload: &str, level: EcLevel) -> Result<(Self, Version), QrError> {
        let data = if payload.is_empty() { PLACEHOLDER } else { payload };
        let code = QrCode::with_error_correction_level(data.as_bytes(), level.to_qrcode()).map_err(|e| match e {
            MatrixError::DataTooLong => QrError::DataTooLarge {
                size: data.len(),
                max: level.max_bytes(),
            },
            other => QrError::QrGenerationError(other.to_string()),
        })?;

        let width = code.width();
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();
        Ok((Self { width, dark }, code.version()))
    }

    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at column `x`, row `y` is dark. Out of range is light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }
}

/// Computes the module grid for `payload` (the placeholder when empty).
pub fn module_grid(payload: &str, level: EcLevel) -> Result<ModuleGrid, QrError> {
    ModuleGrid::build(payload, level).map(|(grid, _)| grid)
}

/// A decoded logo and where it goes on the canvas.
struct Logo {
    image: DynamicImage,
    bytes: Vec<u8>,
    mime: &'static str,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Logo {
    fn load(path: &Path, layout: &Layout) -> Result<Self, QrError> {
        let fail = |reason: String| QrError::LogoError {
            path: path.to_path_buf(),
            reason,
        };
        let bytes = std::fs::read(path).map_err(|e| fail(e.to_string()))?;
        let image = image::load_from_memory(&bytes).map_err(|e| fail(e.to_string()))?;
        if image.width() == 0 || image.height() == 0 {
            return Err(fail("empty image".to_string()));
        }

        let max_side = layout.inner * LOGO_SCALE;
        let scale = max_side / image.width().max(image.height()) as f64;
        let w = image.width() as f64 * scale;
        let h = image.height() as f64 * scale;
        let center = layout.size / 2.0;

        Ok(Self {
            image,
            bytes,
            mime: mime_for(path),
            x: center - w / 2.0,
            y: center - h / 2.0,
            w,
            h,
        })
    }

    /// Whether a module cell overlaps the logo plus its clear margin.
    fn hides(&self, x: f64, y: f64, cell: f64) -> bool {
        let (lx0, ly0) = (self.x - LOGO_MARGIN, self.y - LOGO_MARGIN);
        let (lx1, ly1) = (self.x + self.w + LOGO_MARGIN, self.y + self.h + LOGO_MARGIN);
        x < lx1 && x + cell > lx0 && y < ly1 && y + cell > ly0
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Pixel geometry of the symbol on the canvas.
struct Layout {
    size: f64,
    margin: f64,
    inner: f64,
    cell: f64,
}

impl Layout {
    fn new(config: &QrConfig, modules: usize) -> Self {
        let size = config.size.max(1) as f64;
        let margin = (config.margin as f64).min((size - 1.0) / 2.0).max(0.0);
        let inner = size - 2.0 * margin;
        Self {
            size,
            margin,
            inner,
            cell: inner / modules as f64,
        }
    }

    fn module_origin(&self, mx: usize, my: usize) -> (f64, f64) {
        (
            self.margin + mx as f64 * self.cell,
            self.margin + my as f64 * self.cell,
        )
    }
}

/// Generates a QR code for `payload`.
///
/// An empty payload renders [`PLACEHOLDER`]. Fails with
/// [`QrError::DataTooLarge`] when the payload does not fit at the
/// configured error correction level.
pub fn generate_qr(payload: &str, config: &QrConfig, format: QrFormat) -> Result<QrOutput, QrError> {
    let (matrix, version) = ModuleGrid::build(payload, config.error_correction)?;
    debug!(
        modules = matrix.width,
        version = ?version,
        format = ?format,
        "rendering QR code"
    );

    match format {
        QrFormat::Svg => Ok(QrOutput::Svg(render_svg(&matrix, config)?)),
        QrFormat::Png => Ok(QrOutput::Image(render_png(&matrix, config)?)),
        QrFormat::Ascii => Ok(QrOutput::Ascii(render_text(payload, config.error_correction)?)),
    }
}

/// Generates a QR code and saves it to a file.
///
/// Without an explicit format, the file extension decides (SVG otherwise).
pub fn generate_qr_to_file<P: AsRef<Path>>(
    payload: &str,
    path: P,
    config: &QrConfig,
    format: Option<QrFormat>,
) -> Result<QrFormat, QrError> {
    let path = path.as_ref();
    let format = format
        .or_else(|| QrFormat::from_path(path))
        .unwrap_or_default();

    match generate_qr(payload, config, format)? {
        QrOutput::Image(img) => {
            img.save_with_format(path, ImageFormat::Png)
                .map_err(|e| QrError::ImageSaveError(e.to_string()))?;
        }
        QrOutput::Svg(svg) => {
            std::fs::write(path, svg)?;
        }
        QrOutput::Ascii(text) => {
            std::fs::write(path, text)?;
        }
    }

    Ok(format)
}

/// Small SVG preview stored alongside history entries.
pub fn thumbnail_svg(payload: &str, config: &QrConfig) -> Result<String, QrError> {
    let thumb = QrConfig {
        size: THUMBNAIL_SIZE,
        margin: THUMBNAIL_MARGIN,
        ..config.clone()
    };
    let (matrix, _) = ModuleGrid::build(payload, thumb.error_correction)?;
    render_svg(&matrix, &thumb)
}

/// Returns the version the payload needs at `level`.
pub fn symbol_info(payload: &str, level: EcLevel) -> Result<SymbolInfo, QrError> {
    let (matrix, version) = ModuleGrid::build(payload, level)?;
    let version = match version {
        Version::Normal(v) | Version::Micro(v) => v,
    };
    Ok(SymbolInfo {
        version,
        modules: matrix.width,
    })
}

fn render_text(payload: &str, level: EcLevel) -> Result<String, QrError> {
    let data = if payload.is_empty() { PLACEHOLDER } else { payload };
    let code = QrCode::with_error_correction_level(data.as_bytes(), level.to_qrcode())
        .map_err(|e| QrError::QrGenerationError(e.to_string()))?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .quiet_zone(true)
        .build())
}

fn render_svg(matrix: &ModuleGrid, config: &QrConfig) -> Result<String, QrError> {
    let layout = Layout::new(config, matrix.width);
    let logo = config
        .logo
        .as_deref()
        .map(|path| Logo::load(path, &layout))
        .transpose()?;
    let size = layout.size;

    let mut svg = String::with_capacity(matrix.width * matrix.width * 48);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
        size = size
    );

    let dots_fill = if config.gradient {
        let stops = format!(
            r#"<stop offset="0" stop-color="{}"/><stop offset="1" stop-color="{}"/>"#,
            config.fg_color, config.gradient_color2
        );
        let _ = match config.gradient_type {
            GradientType::Linear => write!(
                svg,
                r#"<defs><linearGradient id="dots-gradient" gradientUnits="userSpaceOnUse" x1="0" y1="0" x2="{}" y2="0">{}</linearGradient></defs>"#,
                size, stops
            ),
            GradientType::Radial => write!(
                svg,
                r#"<defs><radialGradient id="dots-gradient" gradientUnits="userSpaceOnUse" cx="{c}" cy="{c}" r="{c}">{}</radialGradient></defs>"#,
                stops,
                c = size / 2.0
            ),
        };
        "url(#dots-gradient)".to_string()
    } else {
        config.fg_color.to_string()
    };

    let _ = write!(
        svg,
        r#"<rect width="{size}" height="{size}" fill="{}"/>"#,
        config.bg_color,
        size = size
    );

    let mut dots = String::new();
    for my in 0..matrix.width {
        for mx in 0..matrix.width {
            if !matrix.is_dark(mx, my) || is_eye_module(matrix.width, mx, my) {
                continue;
            }
            let (x, y) = layout.module_origin(mx, my);
            if logo.as_ref().is_some_and(|l| l.hides(x, y, layout.cell)) {
                continue;
            }
            dot_shape(config.dot_style, x, y, layout.cell).write_path(&mut dots);
        }
    }
    let _ = write!(svg, r#"<path fill="{}" d="{}"/>"#, dots_fill, dots);

    for (ex, ey) in eye_origins(matrix.width) {
        let (x, y) = layout.module_origin(ex, ey);
        let eye = Eye::new(config.eye_style, x, y, layout.cell);
        let _ = write!(
            svg,
            r#"<path fill="{fg}" fill-rule="evenodd" d="{}"/><path fill="{fg}" d="{}"/>"#,
            eye.ring_path(),
            eye.center_path(),
            fg = config.fg_color
        );
    }

    if let Some(logo) = &logo {
        let _ = write!(
            svg,
            r#"<image x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" href="data:{};base64,{}"/>"#,
            logo.x,
            logo.y,
            logo.w,
            logo.h,
            logo.mime,
            BASE64.encode(&logo.bytes)
        );
    }

    svg.push_str("</svg>");
    Ok(svg)
}

fn render_png(matrix: &ModuleGrid, config: &QrConfig) -> Result<DynamicImage, QrError> {
    let layout = Layout::new(config, matrix.width);
    let logo = config
        .logo
        .as_deref()
        .map(|path| Logo::load(path, &layout))
        .transpose()?;

    let side = layout.size as u32;
    let mut canvas = RgbaImage::from_pixel(side, side, rgba(&config.bg_color));
    let fill = Fill::new(config, layout.size);

    for my in 0..matrix.width {
        for mx in 0..matrix.width {
            if !matrix.is_dark(mx, my) || is_eye_module(matrix.width, mx, my) {
                continue;
            }
            let (x, y) = layout.module_origin(mx, my);
            if logo.as_ref().is_some_and(|l| l.hides(x, y, layout.cell)) {
                continue;
            }
            let shape = dot_shape(config.dot_style, x, y, layout.cell);
            paint_box(&mut canvas, x, y, layout.cell, |px, py| {
                shape.contains(px, py).then(|| fill.at(px, py))
            });
        }
    }

    for (ex, ey) in eye_origins(matrix.width) {
        let (x, y) = layout.module_origin(ex, ey);
        let eye = Eye::new(config.eye_style, x, y, layout.cell);
        let color = rgba(&config.fg_color);
        paint_box(&mut canvas, x, y, layout.cell * 7.0, |px, py| {
            eye.contains(px, py).then_some(color)
        });
    }

    if let Some(logo) = &logo {
        let w = logo.w.round().max(1.0) as u32;
        let h = logo.h.round().max(1.0) as u32;
        let scaled = logo.image.resize_exact(w, h, imageops::FilterType::Triangle).to_rgba8();
        imageops::overlay(&mut canvas, &scaled, logo.x.round() as i64, logo.y.round() as i64);
    }

    Ok(DynamicImage::ImageRgba8(canvas))
}

/// Calls `color_at` for the center of every pixel in the square box and
/// paints the pixels it returns a color for.
fn paint_box<F>(canvas: &mut RgbaImage, x: f64, y: f64, side: f64, color_at: F)
where
    F: Fn(f64, f64) -> Option<Rgba<u8>>,
{
    let (w, h) = canvas.dimensions();
    let x0 = x.floor().max(0.0) as u32;
    let y0 = y.floor().max(0.0) as u32;
    let x1 = ((x + side).ceil() as u32).min(w);
    let y1 = ((y + side).ceil() as u32).min(h);

    for py in y0..y1 {
        for px in x0..x1 {
            if let Some(color) = color_at(px as f64 + 0.5, py as f64 + 0.5) {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

/// Dot color, solid or graded across the canvas.
struct Fill {
    from: HexColor,
    to: Option<(HexColor, GradientType)>,
    size: f64,
}

impl Fill {
    fn new(config: &QrConfig, size: f64) -> Self {
        Self {
            from: config.fg_color,
            to: config
                .gradient
                .then_some((config.gradient_color2, config.gradient_type)),
            size,
        }
    }

    fn at(&self, px: f64, py: f64) -> Rgba<u8> {
        match self.to {
            None => rgba(&self.from),
            Some((to, GradientType::Linear)) => rgba(&self.from.mix(&to, px / self.size)),
            Some((to, GradientType::Radial)) => {
                let c = self.size / 2.0;
                let t = ((px - c).powi(2) + (py - c).powi(2)).sqrt() / c;
                rgba(&self.from.mix(&to, t))
            }
        }
    }
}

fn rgba(color: &HexColor) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::{DotStyle, EyeStyle};

    #[test]
    fn test_generate_qr_svg() {
        let output = generate_qr("https://example.com", &QrConfig::default(), QrFormat::Svg).unwrap();
        let svg = output.as_string().unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert!(!svg.contains("dots-gradient"));
    }

    #[test]
    fn test_generate_qr_png_size() {
        let config = QrConfig {
            size: 240,
            ..Default::default()
        };
        let output = generate_qr("hello", &config, QrFormat::Png).unwrap();
        assert!(output.is_image());
        let img = output.into_image().unwrap();
        assert_eq!(img.width(), 240);
        assert_eq!(img.height(), 240);
    }

    #[test]
    fn test_png_uses_configured_colors() {
        let config = QrConfig {
            fg_color: "#112233".parse().unwrap(),
            bg_color: "#fafafa".parse().unwrap(),
            dot_style: DotStyle::Square,
            eye_style: EyeStyle::Square,
            size: 210,
            margin: 0,
            ..Default::default()
        };
        let img = generate_qr("x", &config, QrFormat::Png)
            .unwrap()
            .into_image()
            .unwrap()
            .to_rgba8();
        // top-left pixel sits on the outer ring of an eye
        assert_eq!(img.get_pixel(1, 1), &Rgba([0x11, 0x22, 0x33, 255]));

        let margined = QrConfig { margin: 20, ..config };
        let img = generate_qr("x", &margined, QrFormat::Png)
            .unwrap()
            .into_image()
            .unwrap()
            .to_rgba8();
        assert_eq!(img.get_pixel(2, 2), &Rgba([0xfa, 0xfa, 0xfa, 255]));
    }

    #[test]
    fn test_gradient_svg() {
        let config = QrConfig {
            gradient: true,
            gradient_type: GradientType::Radial,
            ..Default::default()
        };
        let svg = generate_qr("g", &config, QrFormat::Svg).unwrap();
        let svg = svg.as_string().unwrap();
        assert!(svg.contains("<radialGradient"));
        assert!(svg.contains("#6366f1"));
        assert!(svg.contains("url(#dots-gradient)"));
    }

    #[test]
    fn test_empty_payload_uses_placeholder() {
        let a = generate_qr("", &QrConfig::default(), QrFormat::Svg).unwrap();
        let b = generate_qr(PLACEHOLDER, &QrConfig::default(), QrFormat::Svg).unwrap();
        assert_eq!(a.as_string(), b.as_string());
    }

    #[test]
    fn test_too_large() {
        let config = QrConfig {
            error_correction: EcLevel::H,
            ..Default::default()
        };
        let err = generate_qr(&"a".repeat(1400), &config, QrFormat::Svg).err().unwrap();
        assert!(matches!(err, QrError::DataTooLarge { size: 1400, max: 1273 }));
    }

    #[test]
    fn test_ascii_output() {
        let output = generate_qr("Test", &QrConfig::default(), QrFormat::Ascii).unwrap();
        let text = output.as_string().unwrap();
        assert!(text.lines().count() > 10);
    }

    #[test]
    fn test_thumbnail_dimensions() {
        let svg = thumbnail_svg("thumb", &QrConfig::default()).unwrap();
        assert!(svg.contains(r#"width="80""#));
    }

    #[test]
    fn test_symbol_info_grows() {
        let small = symbol_info("a", EcLevel::M).unwrap();
        let large = symbol_info(&"a".repeat(500), EcLevel::M).unwrap();
        assert_eq!(small.version, 1);
        assert_eq!(small.modules, 21);
        assert!(large.version > small.version);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(QrFormat::from_path(Path::new("a.PNG")), Some(QrFormat::Png));
        assert_eq!(QrFormat::from_path(Path::new("a.svg")), Some(QrFormat::Svg));
        assert_eq!(QrFormat::from_path(Path::new("a.txt")), Some(QrFormat::Ascii));
        assert_eq!(QrFormat::from_path(Path::new("a")), None);
    }

    #[test]
    fn test_logo_embedded_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let logo_path = dir.path().join("logo.png");
        RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]))
            .save(&logo_path)
            .unwrap();

        let config = QrConfig {
            logo: Some(logo_path),
            error_correction: EcLevel::H,
            ..Default::default()
        };
        let svg = generate_qr("logo", &config, QrFormat::Svg).unwrap();
        assert!(svg.as_string().unwrap().contains("data:image/png;base64,"));

        let png = generate_qr("logo", &config, QrFormat::Png).unwrap().into_image().unwrap().to_rgba8();
        assert_eq!(png.get_pixel(150, 150), &Rgba([255, 0, 0, 255]));

        let missing = QrConfig {
            logo: Some(dir.path().join("nope.png")),
            ..Default::default()
        };
        assert!(matches!(
            generate_qr("logo", &missing, QrFormat::Svg),
            Err(QrError::LogoError { .. })
        ));
    }
}
