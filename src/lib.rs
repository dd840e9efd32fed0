//! # QR Studio - styled QR codes for everyday content
//!
//! Turns typed content (URL, text, email, phone, SMS, Wi-Fi credentials,
//! contact card) into the payload string a scanner understands, checks it
//! against the symbol's capacity and the colors' contrast, and renders it
//! as a styled SVG, PNG or terminal QR code.
//!
//! ## Example Usage
//!
//! ```rust
//! use qrstudio::payload::{ContentRecord, ContentType};
//! use qrstudio::qr::{generate_qr, QrConfig, QrFormat};
//! use qrstudio::validate::validate;
//!
//! let mut wifi = ContentRecord::empty(ContentType::Wifi);
//! wifi.set_field("ssid", "My;Net").unwrap();
//! wifi.set_field("password", "secret").unwrap();
//!
//! let payload = wifi.encode();
//! assert_eq!(payload, "WIFI:T:WPA;S:My\\;Net;P:secret;H:false;;");
//!
//! let config = QrConfig::default();
//! assert!(validate(&payload, &config).is_empty());
//!
//! let svg = generate_qr(&payload, &config, QrFormat::Svg).unwrap();
//! assert!(svg.as_string().unwrap().starts_with("<svg"));
//! ```
//!
//! ## Modules
//!
//! - [`payload`]: Content records and payload encoding
//! - [`validate`]: Capacity and contrast warnings
//! - [`qr`]: Rendering (SVG/PNG/text) and reading
//! - [`clipboard`]: Copying the SVG markup
//! - [`studio`]: Editing state with per-type drafts
//! - [`history`]: Saved codes and preferences over a key-value store
//! - [`settings`]: `settings.toml` and the data directory
//! - [`debounce`]: Delayed, cancellable refresh messages
//! - [`tui`]: Interactive terminal studio

pub mod clipboard;
pub mod color;
pub mod debounce;
pub mod history;
pub mod logging;
pub mod payload;
pub mod qr;
pub mod settings;
pub mod studio;
pub mod tui;
pub mod validate;

// Re-export commonly used types at the crate root
pub use color::HexColor;
pub use history::{History, HistoryEntry};
pub use payload::{encode, ContentRecord, ContentType, PayloadError};
pub use qr::{generate_qr, read_qr, EcLevel, QrConfig, QrError, QrFormat};
pub use studio::Studio;
pub use validate::{validate, Severity, Warning};
