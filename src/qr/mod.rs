//! QR code rendering and reading.
//!
//! The module matrix comes from the `qrcode` crate. This module only
//! decides how it looks: dot and eye shapes, colors, gradients and an
//! optional center logo, written out as SVG, PNG or terminal text.

mod config;
mod generator;
mod reader;
mod shape;

pub use config::{DotStyle, EcLevel, EyeStyle, GradientType, QrConfig, DEFAULT_MARGIN, DEFAULT_SIZE};
pub use generator::{
    generate_qr, generate_qr_to_file, module_grid, symbol_info, thumbnail_svg, ModuleGrid, QrFormat,
    QrOutput, SymbolInfo, EXPORT_PNG_SIZE, PLACEHOLDER,
};
pub use reader::{read_qr, read_qr_from_file};

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during QR code operations.
#[derive(Error, Debug)]
pub enum QrError {
    #[error("Data too large for QR code: {size} bytes, max {max} bytes at this error correction level")]
    DataTooLarge { size: usize, max: usize },

    #[error("QR code generation failed: {0}")]
    QrGenerationError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),

    #[error("Cannot load logo {path}: {reason}")]
    LogoError { path: PathBuf, reason: String },

    #[error("QR code read error: {0}")]
    QrReadError(String),

    #[error("No QR code found in image")]
    NoQrCodeFound,

    #[error("Invalid {option}: {value}")]
    InvalidOption { option: &'static str, value: String },

    #[error("Unknown format: {0}. Use: png, svg, or ascii")]
    UnknownFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
