//! Editing state for one QR code.
//!
//! [`Studio`] owns the selected content type, one draft per type and the
//! style configuration. Everything shown in a preview is derived from it
//! on demand.

use std::collections::BTreeMap;
use std::mem;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::color::HexColor;
use crate::history::HistoryEntry;
use crate::payload::{ContentRecord, ContentType, PayloadError, UrlFields};
use crate::qr::{
    generate_qr, thumbnail_svg, DotStyle, EcLevel, EyeStyle, GradientType, QrConfig, QrError,
    QrFormat, QrOutput,
};
use crate::settings::Settings;
use crate::validate::{capacity, validate, Capacity, Warning};

/// URL shown when the studio opens.
pub const STARTER_URL: &str = "https://example.com";

#[derive(Debug, Clone)]
pub struct Studio {
    /// Draft of the selected type
    current: ContentRecord,
    /// Drafts of the other types, kept across switches
    stashed: BTreeMap<ContentType, ContentRecord>,
    config: QrConfig,
    auto_upgrade_ec: bool,
}

impl Studio {
    pub fn new(settings: &Settings) -> Self {
        Self {
            current: ContentRecord::Url(UrlFields {
                url: STARTER_URL.to_string(),
            }),
            stashed: BTreeMap::new(),
            config: settings.defaults.clone(),
            auto_upgrade_ec: settings.auto_upgrade_ec,
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.current.content_type()
    }

    /// Switches to `content_type`, keeping the current draft for later.
    pub fn select_type(&mut self, content_type: ContentType) {
        if content_type == self.content_type() {
            return;
        }
        let next = self
            .stashed
            .remove(&content_type)
            .unwrap_or_else(|| ContentRecord::empty(content_type));
        let previous = mem::replace(&mut self.current, next);
        self.stashed.insert(previous.content_type(), previous);
        debug!(content_type = %content_type, "content type selected");
    }

    /// Draft of the selected type.
    pub fn record(&self) -> &ContentRecord {
        &self.current
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), PayloadError> {
        self.current.set_field(name, value)
    }

    pub fn config(&self) -> &QrConfig {
        &self.config
    }

    pub fn set_ec_level(&mut self, level: EcLevel) {
        self.config.error_correction = level;
    }

    pub fn set_colors(&mut self, fg: HexColor, bg: HexColor) {
        self.config.fg_color = fg;
        self.config.bg_color = bg;
    }

    pub fn set_dot_style(&mut self, style: DotStyle) {
        self.config.dot_style = style;
    }

    pub fn set_eye_style(&mut self, style: EyeStyle) {
        self.config.eye_style = style;
    }

    pub fn set_gradient(&mut self, enabled: bool, color2: HexColor, kind: GradientType) {
        self.config.gradient = enabled;
        self.config.gradient_color2 = color2;
        self.config.gradient_type = kind;
    }

    pub fn set_size(&mut self, size: u32) {
        self.config.size = size;
    }

    pub fn set_margin(&mut self, margin: u32) {
        self.config.margin = margin;
    }

    /// Attaches a center logo.
    ///
    /// With auto-upgrade enabled, a level of L or M is raised to H.
    /// Returns whether that happened.
    pub fn attach_logo(&mut self, path: PathBuf) -> bool {
        self.set_logo(path);

        let weak = matches!(self.config.error_correction, EcLevel::L | EcLevel::M);
        if self.auto_upgrade_ec && weak {
            info!(
                from = %self.config.error_correction,
                "raising error correction to H for logo"
            );
            self.config.error_correction = EcLevel::H;
            return true;
        }
        false
    }

    /// Sets the logo and leaves the error correction level alone.
    pub fn set_logo(&mut self, path: PathBuf) {
        self.config.logo = Some(path);
    }

    pub fn remove_logo(&mut self) {
        self.config.logo = None;
    }

    /// Payload of the current draft. Empty when a required field is missing.
    pub fn encoded(&self) -> String {
        self.current.encode()
    }

    pub fn capacity(&self) -> Capacity {
        capacity(&self.encoded(), self.config.error_correction)
    }

    pub fn warnings(&self) -> Vec<Warning> {
        validate(&self.encoded(), &self.config)
    }

    /// Renders the current draft. An empty draft renders the placeholder.
    pub fn render(&self, format: QrFormat) -> Result<QrOutput, QrError> {
        generate_qr(&self.encoded(), &self.config, format)
    }

    /// A history entry for the current draft, or `None` if there is
    /// nothing to save.
    pub fn snapshot(&self) -> Option<HistoryEntry> {
        let encoded = self.encoded();
        if encoded.is_empty() {
            return None;
        }
        let thumbnail = thumbnail_svg(&encoded, &self.config).ok();
        Some(HistoryEntry::new(
            self.current.clone(),
            self.config.clone(),
            thumbnail,
        ))
    }

    /// Loads a saved entry: its type becomes current with its data as the
    /// draft, and its style replaces the config.
    pub fn restore(&mut self, entry: &HistoryEntry) {
        self.select_type(entry.content_type());
        self.current = entry.content.clone();
        self.config = entry.config.clone();
        debug!(id = entry.id, "history entry restored");
    }
}
