//! Application state for the studio TUI.

use std::path::{Path, PathBuf};

use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::color::HexColor;
use crate::history::{History, KvStore, Preferences, StoreError};
use crate::payload::{fields_for, ContentType, FieldKind, FieldDef};
use crate::qr::{
    generate_qr_to_file, module_grid, EcLevel, GradientType, ModuleGrid, QrConfig, QrFormat,
    EXPORT_PNG_SIZE,
};
use crate::studio::Studio;
use crate::validate::{Capacity, Warning};

/// Foreground colors offered in the style pane.
pub const FG_PRESETS: [HexColor; 6] = [
    HexColor::rgb(0x00, 0x00, 0x00),
    HexColor::rgb(0x1e, 0x29, 0x3b),
    HexColor::rgb(0x4f, 0x46, 0xe5),
    HexColor::rgb(0x05, 0x96, 0x69),
    HexColor::rgb(0xdc, 0x26, 0x26),
    HexColor::rgb(0x99, 0x99, 0x99),
];

/// Background colors offered in the style pane.
pub const BG_PRESETS: [HexColor; 4] = [
    HexColor::rgb(0xff, 0xff, 0xff),
    HexColor::rgb(0xf8, 0xfa, 0xfc),
    HexColor::rgb(0xfe, 0xf3, 0xc7),
    HexColor::rgb(0x00, 0x00, 0x00),
];

/// Which pane receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Content,
    Style,
    History,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Content => Focus::Style,
            Focus::Style => Focus::History,
            Focus::History => Focus::Content,
        }
    }
}

/// Rows of the style pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRow {
    ErrorCorrection,
    DotStyle,
    EyeStyle,
    Foreground,
    Background,
    Gradient,
    GradientType,
    Logo,
}

impl StyleRow {
    pub const ALL: [StyleRow; 8] = [
        StyleRow::ErrorCorrection,
        StyleRow::DotStyle,
        StyleRow::EyeStyle,
        StyleRow::Foreground,
        StyleRow::Background,
        StyleRow::Gradient,
        StyleRow::GradientType,
        StyleRow::Logo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StyleRow::ErrorCorrection => "Error correction",
            StyleRow::DotStyle => "Dots",
            StyleRow::EyeStyle => "Eyes",
            StyleRow::Foreground => "Foreground",
            StyleRow::Background => "Background",
            StyleRow::Gradient => "Gradient",
            StyleRow::GradientType => "Gradient type",
            StyleRow::Logo => "Logo",
        }
    }

    /// Current value as shown in the pane.
    pub fn value(&self, config: &QrConfig, logo_input: &str) -> String {
        match self {
            StyleRow::ErrorCorrection => format!(
                "{} ({})",
                config.error_correction,
                config.error_correction.description()
            ),
            StyleRow::DotStyle => config.dot_style.as_str().to_string(),
            StyleRow::EyeStyle => config.eye_style.as_str().to_string(),
            StyleRow::Foreground => config.fg_color.to_string(),
            StyleRow::Background => config.bg_color.to_string(),
            StyleRow::Gradient => {
                if config.gradient {
                    format!("on → {}", config.gradient_color2)
                } else {
                    "off".to_string()
                }
            }
            StyleRow::GradientType => match config.gradient_type {
                GradientType::Linear => "linear".to_string(),
                GradientType::Radial => "radial".to_string(),
            },
            StyleRow::Logo => logo_input.to_string(),
        }
    }
}

/// What the preview pane shows, recomputed on refresh.
#[derive(Debug, Clone)]
pub struct Preview {
    /// Module grid, or `None` if the payload does not fit
    pub grid: Option<ModuleGrid>,
    pub error: Option<String>,
    pub capacity: Capacity,
    pub warnings: Vec<Warning>,
}

/// Application state for the studio.
pub struct App<S: KvStore> {
    pub studio: Studio,
    pub history: History<S>,
    prefs: Preferences<S>,
    /// Dark color theme.
    pub dark: bool,
    pub focus: Focus,
    /// Selected row in the focused pane.
    pub row: usize,
    /// Cursor position (in chars) within the selected text row.
    pub cursor_position: usize,
    /// Logo path being typed in the style pane.
    pub logo_input: String,
    pub preview: Preview,
    /// Edits made since the preview was last computed.
    pub stale: bool,
    /// One-line feedback shown in the footer.
    pub status: Option<String>,
    pub should_quit: bool,
    clipboard: Box<dyn ClipboardSink>,
}

impl<S: KvStore> App<S> {
    pub fn new(studio: Studio, history: History<S>, prefs: Preferences<S>) -> Result<Self, StoreError> {
        let dark = prefs.dark_mode()?.unwrap_or(false);
        let preview = compute_preview(&studio);
        let logo_input = path_text(studio.config().logo.as_deref());
        let mut app = Self {
            studio,
            history,
            prefs,
            dark,
            focus: Focus::Content,
            row: 0,
            cursor_position: 0,
            logo_input,
            preview,
            stale: false,
            status: None,
            should_quit: false,
            clipboard: Box::new(SystemClipboard::new()),
        };
        app.move_cursor_end();
        Ok(app)
    }

    /// Replaces the clipboard that Copy SVG writes to.
    pub fn with_clipboard(mut self, clipboard: impl ClipboardSink + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    /// Input fields of the selected content type.
    pub fn fields(&self) -> &'static [FieldDef] {
        fields_for(self.studio.content_type())
    }

    pub fn selected_field(&self) -> Option<&'static FieldDef> {
        match self.focus {
            Focus::Content => self.fields().get(self.row),
            _ => None,
        }
    }

    pub fn selected_style_row(&self) -> Option<StyleRow> {
        match self.focus {
            Focus::Style => StyleRow::ALL.get(self.row).copied(),
            _ => None,
        }
    }

    fn row_count(&self) -> usize {
        match self.focus {
            Focus::Content => self.fields().len(),
            Focus::Style => StyleRow::ALL.len(),
            Focus::History => self.history.len(),
        }
    }

    /// Whether the selected row takes typed characters.
    pub fn is_text_row(&self) -> bool {
        match (self.selected_field(), self.selected_style_row()) {
            (Some(field), _) => matches!(
                field.kind,
                FieldKind::Line | FieldKind::Multiline | FieldKind::Password
            ),
            (_, Some(StyleRow::Logo)) => true,
            _ => false,
        }
    }

    /// Text of the selected row, if it is a text row.
    pub fn current_text(&self) -> Option<String> {
        if !self.is_text_row() {
            return None;
        }
        match (self.selected_field(), self.selected_style_row()) {
            (Some(field), _) => self.studio.record().field(field.name),
            (_, Some(StyleRow::Logo)) => Some(self.logo_input.clone()),
            _ => None,
        }
    }

    fn set_current_text(&mut self, text: String) {
        match (self.selected_field(), self.selected_style_row()) {
            (Some(field), _) => {
                if let Err(e) = self.studio.set_field(field.name, &text) {
                    self.status = Some(e.to_string());
                }
                self.stale = true;
            }
            (_, Some(StyleRow::Logo)) => self.logo_input = text,
            _ => {}
        }
    }

    /// Switch pane focus.
    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
        self.row = 0;
        self.move_cursor_end();
    }

    /// Select another content type; its draft is kept from earlier edits.
    pub fn select_type(&mut self, content_type: ContentType) {
        self.studio.select_type(content_type);
        if self.focus == Focus::Content {
            self.row = 0;
        }
        self.move_cursor_end();
    }

    pub fn next_type(&mut self) {
        self.select_type(self.studio.content_type().next());
    }

    pub fn prev_type(&mut self) {
        self.select_type(self.studio.content_type().prev());
    }

    pub fn move_up(&mut self) {
        self.row = self.row.saturating_sub(1);
        self.move_cursor_end();
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.row_count() {
            self.row += 1;
        }
        self.move_cursor_end();
    }

    /// Move cursor left.
    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }

    /// Move cursor right.
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.text_len();
    }

    /// Insert a character at the cursor.
    pub fn enter_char(&mut self, c: char) {
        let Some(mut text) = self.current_text() else {
            return;
        };
        let index = byte_index(&text, self.cursor_position);
        text.insert(index, c);
        self.set_current_text(text);
        self.move_cursor_right();
    }

    /// Delete character before cursor.
    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let Some(text) = self.current_text() else {
            return;
        };

        let current_index = self.cursor_position;
        let before = text.chars().take(current_index - 1);
        let after = text.chars().skip(current_index);
        self.set_current_text(before.chain(after).collect());
        self.move_cursor_left();
    }

    /// Delete character after cursor.
    pub fn delete_char_forward(&mut self) {
        let Some(text) = self.current_text() else {
            return;
        };
        if self.cursor_position >= text.chars().count() {
            return;
        }

        let before = text.chars().take(self.cursor_position);
        let after = text.chars().skip(self.cursor_position + 1);
        self.set_current_text(before.chain(after).collect());
    }

    fn text_len(&self) -> usize {
        self.current_text().map_or(0, |t| t.chars().count())
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.min(self.text_len())
    }

    /// Applies the selected non-text row: cycles a select or style value,
    /// flips a toggle, attaches the typed logo, or restores the selected
    /// history entry. Returns whether the code changed.
    pub fn activate(&mut self) -> bool {
        match self.focus {
            Focus::Content => self.activate_field(),
            Focus::Style => self.activate_style(),
            Focus::History => self.restore_selected(),
        }
    }

    fn activate_field(&mut self) -> bool {
        let Some(field) = self.selected_field() else {
            return false;
        };
        let current = self.studio.record().field(field.name).unwrap_or_default();
        let next = match field.kind {
            FieldKind::Select(options) => {
                let index = options.iter().position(|o| *o == current).unwrap_or(0);
                options[(index + 1) % options.len()].to_string()
            }
            FieldKind::Toggle => (current != "true").to_string(),
            _ => return false,
        };
        match self.studio.set_field(field.name, &next) {
            Ok(()) => true,
            Err(e) => {
                self.status = Some(e.to_string());
                false
            }
        }
    }

    fn activate_style(&mut self) -> bool {
        let Some(row) = self.selected_style_row() else {
            return false;
        };
        let config = self.studio.config().clone();
        match row {
            StyleRow::ErrorCorrection => self.studio.set_ec_level(config.error_correction.next()),
            StyleRow::DotStyle => self.studio.set_dot_style(config.dot_style.next()),
            StyleRow::EyeStyle => self.studio.set_eye_style(config.eye_style.next()),
            StyleRow::Foreground => self
                .studio
                .set_colors(next_preset(&FG_PRESETS, config.fg_color), config.bg_color),
            StyleRow::Background => self
                .studio
                .set_colors(config.fg_color, next_preset(&BG_PRESETS, config.bg_color)),
            StyleRow::Gradient => self.studio.set_gradient(
                !config.gradient,
                config.gradient_color2,
                config.gradient_type,
            ),
            StyleRow::GradientType => {
                let kind = match config.gradient_type {
                    GradientType::Linear => GradientType::Radial,
                    GradientType::Radial => GradientType::Linear,
                };
                self.studio
                    .set_gradient(config.gradient, config.gradient_color2, kind)
            }
            StyleRow::Logo => return self.apply_logo(),
        }
        true
    }

    /// Attaches the typed logo path, or removes the logo if it is blank.
    pub fn apply_logo(&mut self) -> bool {
        let path = self.logo_input.trim();
        if path.is_empty() {
            self.studio.remove_logo();
            self.status = Some("Logo removed".to_string());
            return true;
        }
        if !Path::new(path).is_file() {
            self.status = Some(format!("Logo not found: {}", path));
            return false;
        }

        let upgraded = self.studio.attach_logo(PathBuf::from(path));
        self.status = Some(if upgraded {
            format!(
                "Logo attached, error correction raised to {}",
                EcLevel::H
            )
        } else {
            "Logo attached".to_string()
        });
        true
    }

    fn restore_selected(&mut self) -> bool {
        let Some(entry) = self.history.entries().get(self.row).cloned() else {
            return false;
        };
        self.studio.restore(&entry);
        self.logo_input = path_text(entry.config.logo.as_deref());
        self.status = Some(format!("Restored \"{}\"", entry.label));
        true
    }

    /// Saves the current code to history.
    pub fn save(&mut self) {
        let Some(entry) = self.studio.snapshot() else {
            self.status = Some("Enter content first".to_string());
            return;
        };
        self.status = Some(match self.history.push(entry) {
            Ok(saved) => format!("Saved \"{}\" to history", saved.label),
            Err(e) => format!("Could not save history: {}", e),
        });
    }

    /// Deletes the selected history entry.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.history.entries().get(self.row).map(|e| e.id) else {
            return;
        };
        match self.history.remove(id) {
            Ok(_) => {
                self.row = self.row.min(self.history.len().saturating_sub(1));
                self.status = Some("Entry deleted".to_string());
            }
            Err(e) => self.status = Some(format!("Could not save history: {}", e)),
        }
    }

    pub fn toggle_dark(&mut self) {
        self.dark = !self.dark;
        if let Err(e) = self.prefs.set_dark_mode(self.dark) {
            self.status = Some(format!("Could not save theme: {}", e));
        }
    }

    /// Writes the current code into `dir` as SVG, or as a high-resolution PNG.
    pub fn export(&mut self, dir: &Path, format: QrFormat) {
        let encoded = self.studio.encoded();
        if encoded.is_empty() {
            self.status = Some("Enter content first".to_string());
            return;
        }
        let mut config = self.studio.config().clone();
        let (ext, done) = match format {
            QrFormat::Png => {
                config.size = EXPORT_PNG_SIZE;
                ("png", format!("PNG exported ({0}×{0})", EXPORT_PNG_SIZE))
            }
            QrFormat::Svg => ("svg", "SVG exported".to_string()),
            QrFormat::Ascii => ("txt", "Text exported".to_string()),
        };
        let path = dir.join(format!(
            "qrstudio-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            ext
        ));
        self.status = Some(
            match generate_qr_to_file(&encoded, &path, &config, Some(format)) {
                Ok(_) => format!("{}: {}", done, path.display()),
                Err(e) => format!("Export failed: {}", e),
            },
        );
    }

    /// Copies the SVG markup of the current code to the clipboard.
    pub fn copy_svg(&mut self) {
        if self.studio.encoded().is_empty() {
            self.status = Some("Enter content first".to_string());
            return;
        }
        let svg = match self.studio.render(QrFormat::Svg) {
            Ok(output) => output.as_string().unwrap_or_default().to_string(),
            Err(e) => {
                self.status = Some(format!("Export failed: {}", e));
                return;
            }
        };
        self.status = Some(match self.clipboard.set_text(&svg) {
            Ok(()) => "SVG copied to clipboard".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard copy failed");
                "Clipboard unavailable, try exporting (Ctrl+G)".to_string()
            }
        });
    }

    /// Recomputes the preview from the current draft and style.
    pub fn refresh_preview(&mut self) {
        self.preview = compute_preview(&self.studio);
        self.stale = false;
    }
}

fn compute_preview(studio: &Studio) -> Preview {
    let (grid, error) = match module_grid(&studio.encoded(), studio.config().error_correction) {
        Ok(grid) => (Some(grid), None),
        Err(e) => (None, Some(e.to_string())),
    };
    Preview {
        grid,
        error,
        capacity: studio.capacity(),
        warnings: studio.warnings(),
    }
}

fn next_preset(presets: &[HexColor], current: HexColor) -> HexColor {
    let next = presets
        .iter()
        .position(|c| *c == current)
        .map_or(0, |i| (i + 1) % presets.len());
    presets[next]
}

fn path_text(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

/// Byte index of the `cursor`-th char.
fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .map(|(i, _)| i)
        .nth(cursor)
        .unwrap_or(text.len())
}
