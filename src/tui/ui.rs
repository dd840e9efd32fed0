//! UI rendering for the studio TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Tabs},
    Frame,
};

use super::app::{App, Focus, StyleRow};
use crate::color::HexColor;
use crate::history::KvStore;
use crate::payload::{ContentType, FieldKind, FieldDef};
use crate::qr::ModuleGrid;
use crate::validate::Severity;

/// Light modules drawn around the symbol in the preview.
const PREVIEW_QUIET_ZONE: usize = 2;

/// Gauge turns yellow at this rounded fill percentage.
const GAUGE_YELLOW_PERCENT: u8 = 60;
/// Gauge turns red at this rounded fill percentage.
const GAUGE_RED_PERCENT: u8 = 85;

/// Colors for the light and dark themes.
struct Theme {
    base: Style,
    accent: Color,
    muted: Color,
}

impl Theme {
    fn new(dark: bool) -> Self {
        if dark {
            Self {
                base: Style::default()
                    .fg(Color::Rgb(0xe2, 0xe8, 0xf0))
                    .bg(Color::Rgb(0x0f, 0x17, 0x2a)),
                accent: Color::Rgb(0x81, 0x8c, 0xf8),
                muted: Color::Rgb(0x64, 0x74, 0x8b),
            }
        } else {
            Self {
                base: Style::default(),
                accent: Color::Rgb(0x4f, 0x46, 0xe5),
                muted: Color::DarkGray,
            }
        }
    }

    fn block<'a>(&self, title: &'a str, focused: bool) -> Block<'a> {
        let border = if focused { self.accent } else { self.muted };
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(self.base)
            .border_style(Style::default().fg(border))
    }
}

/// Main render function.
pub fn render<S: KvStore>(frame: &mut Frame, app: &App<S>) {
    let theme = Theme::new(app.dark);
    frame.render_widget(Block::default().style(theme.base), frame.area());

    // Header with type tabs, body, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_tabs(frame, app, &theme, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(StyleRow::ALL.len() as u16 + 2),
            Constraint::Length(8),
        ])
        .split(columns[0]);

    render_fields(frame, app, &theme, left[0]);
    render_style(frame, app, &theme, left[1]);
    render_history(frame, app, &theme, left[2]);

    let warnings_height = app.preview.warnings.len().max(1) as u16 + 2;
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(warnings_height),
        ])
        .split(columns[1]);

    render_preview(frame, app, &theme, right[0]);
    render_capacity(frame, app, &theme, right[1]);
    render_warnings(frame, app, &theme, right[2]);

    render_footer(frame, app, &theme, chunks[2]);
}

fn render_tabs<S: KvStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let titles: Vec<Line> = ContentType::ALL.iter().map(|t| Line::from(t.label())).collect();
    let selected = ContentType::ALL
        .iter()
        .position(|t| *t == app.studio.content_type())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(theme.block(" QR Studio  (Ctrl+←/→ type) ", false))
        .style(theme.base)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    frame.render_widget(tabs, area);
}

/// Field value as shown on screen.
fn display_value(field: &FieldDef, value: &str) -> String {
    match field.kind {
        FieldKind::Password => "•".repeat(value.chars().count()),
        FieldKind::Multiline => value.replace('\n', "⏎"),
        FieldKind::Select(_) => format!("‹ {} ›", value),
        FieldKind::Toggle => {
            if value == "true" {
                "[x]".to_string()
            } else {
                "[ ]".to_string()
            }
        }
        FieldKind::Line => value.to_string(),
    }
}

fn render_fields<S: KvStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let focused = app.focus == Focus::Content;
    let fields = app.fields();
    let label_width = fields.iter().map(|f| f.label.chars().count()).max().unwrap_or(0);

    let items: Vec<ListItem> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let value = app.studio.record().field(field.name).unwrap_or_default();
            let selected = focused && i == app.row;
            let label = format!("{:>width$}: ", field.label, width = label_width);

            let value_span = if value.is_empty() && !field.placeholder.is_empty() {
                Span::styled(field.placeholder, Style::default().fg(theme.muted))
            } else {
                Span::raw(display_value(field, &value))
            };
            let label_style = if selected {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![Span::styled(label, label_style), value_span]))
        })
        .collect();

    frame.render_widget(
        List::new(items).block(theme.block(" Content ", focused)),
        area,
    );

    if focused && app.is_text_row() {
        let column = (label_width + 2).saturating_add(app.cursor_position);
        frame.set_cursor_position(cursor_cell(area, column, app.row));
    }
}

fn render_style<S: KvStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let focused = app.focus == Focus::Style;
    let config = app.studio.config();
    let label_width = StyleRow::ALL
        .iter()
        .map(|r| r.label().chars().count())
        .max()
        .unwrap_or(0);

    let items: Vec<ListItem> = StyleRow::ALL
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let selected = focused && i == app.row;
            let label = format!("{:>width$}: ", row.label(), width = label_width);
            let label_style = if selected {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut spans = vec![Span::styled(label, label_style)];
            match row {
                StyleRow::Foreground => spans.push(swatch(config.fg_color)),
                StyleRow::Background => spans.push(swatch(config.bg_color)),
                _ => {}
            }
            spans.push(Span::raw(row.value(config, &app.logo_input)));
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(
        List::new(items).block(theme.block(" Style  (Space to change) ", focused)),
        area,
    );

    if app.selected_style_row() == Some(StyleRow::Logo) {
        let column = (label_width + 2).saturating_add(app.cursor_position);
        frame.set_cursor_position(cursor_cell(area, column, app.row));
    }
}

/// Terminal cell for a cursor `column` chars into `row` of a bordered list,
/// kept inside the border.
fn cursor_cell(area: Rect, column: usize, row: usize) -> (u16, u16) {
    let x = area
        .x
        .saturating_add(1)
        .saturating_add(u16::try_from(column).unwrap_or(u16::MAX))
        .min(area.right().saturating_sub(2));
    let y = area
        .y
        .saturating_add(1)
        .saturating_add(u16::try_from(row).unwrap_or(u16::MAX))
        .min(area.bottom().saturating_sub(2));
    (x, y)
}

fn swatch(color: HexColor) -> Span<'static> {
    Span::styled("  ", Style::default().bg(rgb(color)))
}

fn render_history<S: KvStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let focused = app.focus == Focus::History;

    let items: Vec<ListItem> = if app.history.is_empty() {
        vec![ListItem::new(Span::styled(
            "No saved codes yet (Ctrl+S)",
            Style::default().fg(theme.muted),
        ))]
    } else {
        app.history
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if focused && i == app.row {
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<6}", entry.content_type().label()), Style::default().fg(theme.muted)),
                    Span::styled(entry.label.clone(), style),
                    Span::styled(
                        format!("  {}", entry.timestamp.format("%Y-%m-%d %H:%M")),
                        Style::default().fg(theme.muted),
                    ),
                ]))
            })
            .collect()
    };

    frame.render_widget(
        List::new(items).block(theme.block(" History  (Enter restore, Del remove) ", focused)),
        area,
    );
}

/// Whether the module at `(x, y)` of the padded grid is dark.
fn dark_at(grid: &ModuleGrid, x: usize, y: usize) -> bool {
    let q = PREVIEW_QUIET_ZONE;
    x >= q && y >= q && grid.is_dark(x - q, y - q)
}

/// Renders the grid two module rows per text line with half blocks.
pub fn preview_lines(grid: &ModuleGrid) -> Vec<String> {
    let side = grid.width() + 2 * PREVIEW_QUIET_ZONE;
    (0..side)
        .step_by(2)
        .map(|y| {
            (0..side)
                .map(|x| match (dark_at(grid, x, y), dark_at(grid, x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect()
        })
        .collect()
}

fn render_preview<S: KvStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let title = if app.stale { " Preview … " } else { " Preview " };
    let block = theme.block(title, false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let config = app.studio.config();
    let paragraph = match (&app.preview.grid, &app.preview.error) {
        (Some(grid), _) => {
            let lines = preview_lines(grid);
            let fits = lines.len() <= inner.height as usize
                && grid.width() + 2 * PREVIEW_QUIET_ZONE <= inner.width as usize;
            if fits {
                let style = Style::default().fg(rgb(config.fg_color)).bg(rgb(config.bg_color));
                let top = (inner.height as usize - lines.len()) / 2;
                let mut text: Vec<Line> = vec![Line::from(""); top];
                text.extend(lines.into_iter().map(|l| Line::from(Span::styled(l, style)).centered()));
                Paragraph::new(text)
            } else {
                Paragraph::new(Line::from(Span::styled(
                    format!(
                        "{}×{} modules — enlarge the terminal to preview",
                        grid.width(),
                        grid.width()
                    ),
                    Style::default().fg(theme.muted),
                )))
            }
        }
        (None, Some(error)) => Paragraph::new(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ))),
        (None, None) => Paragraph::new(""),
    };
    frame.render_widget(paragraph, inner);
}

fn render_capacity<S: KvStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let capacity = app.preview.capacity;
    let color = capacity_color(capacity.percent);

    let gauge = Gauge::default()
        .block(theme.block(" Capacity ", false))
        .gauge_style(Style::default().fg(color))
        .percent(u16::from(capacity.percent))
        .label(format!(
            "{} / {} bytes ({}%) · EC {}",
            capacity.bytes,
            capacity.max_bytes,
            capacity.percent,
            app.studio.config().error_correction
        ));
    frame.render_widget(gauge, area);
}

fn capacity_color(percent: u8) -> Color {
    if percent < GAUGE_YELLOW_PERCENT {
        Color::Green
    } else if percent < GAUGE_RED_PERCENT {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn render_warnings<S: KvStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let items: Vec<ListItem> = if app.preview.warnings.is_empty() {
        vec![ListItem::new(Span::styled(
            "✓ Ready to scan",
            Style::default().fg(Color::Green),
        ))]
    } else {
        app.preview
            .warnings
            .iter()
            .map(|w| {
                let (icon, color) = match w.severity {
                    Severity::Info => ("ℹ", theme.accent),
                    Severity::Warn => ("⚠", Color::Yellow),
                    Severity::Error => ("✗", Color::Red),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", icon), Style::default().fg(color)),
                    Span::raw(w.message.clone()),
                ]))
            })
            .collect()
    };

    frame.render_widget(List::new(items).block(theme.block(" Checks ", false)), area);
}

fn render_footer<S: KvStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let line = match &app.status {
        Some(status) => Line::from(Span::styled(format!(" {}", status), Style::default().fg(theme.accent))),
        None => Line::from(Span::styled(
            " Tab pane · ↑/↓ row · Ctrl+S save · Ctrl+E PNG · Ctrl+G SVG · Ctrl+Y copy SVG · Ctrl+D theme · Esc quit",
            Style::default().fg(theme.muted),
        )),
    };
    frame.render_widget(Paragraph::new(line).style(theme.base), area);
}

fn rgb(color: HexColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::{module_grid, EcLevel};

    #[test]
    fn test_preview_lines_shape() {
        let grid = module_grid("hi", EcLevel::M).unwrap();
        let lines = preview_lines(&grid);
        // 21 modules + 4 quiet = 25 rows, two per line
        assert_eq!(lines.len(), 13);
        assert!(lines.iter().all(|l| l.chars().count() == 25));
        // quiet zone on top
        assert!(lines[0].chars().all(|c| c == ' '));
        // finder pattern starts at module (2, 2): full top ring row
        assert_eq!(lines[1].chars().nth(2), Some('█'));
    }

    #[test]
    fn test_capacity_color_bands() {
        assert_eq!(capacity_color(0), Color::Green);
        assert_eq!(capacity_color(59), Color::Green);
        assert_eq!(capacity_color(60), Color::Yellow);
        assert_eq!(capacity_color(76), Color::Yellow);
        assert_eq!(capacity_color(84), Color::Yellow);
        assert_eq!(capacity_color(85), Color::Red);
        assert_eq!(capacity_color(100), Color::Red);
    }

    #[test]
    fn test_cursor_cell_stays_inside_border() {
        let area = Rect::new(10, 5, 40, 12);
        assert_eq!(cursor_cell(area, 3, 2), (14, 8));
        assert_eq!(cursor_cell(area, 100_000, 0), (48, 6));
        assert_eq!(cursor_cell(area, usize::MAX, usize::MAX), (48, 15));

        let corner = Rect::new(u16::MAX - 4, u16::MAX - 4, 4, 4);
        let (x, y) = cursor_cell(corner, 70_000, 70_000);
        assert_eq!((x, y), (u16::MAX - 2, u16::MAX - 2));
    }

    #[test]
    fn test_display_value() {
        let password = FieldDef {
            name: "password",
            label: "Password",
            placeholder: "",
            kind: FieldKind::Password,
        };
        assert_eq!(display_value(&password, "abc"), "•••");

        let toggle = FieldDef {
            kind: FieldKind::Toggle,
            ..password
        };
        assert_eq!(display_value(&toggle, "true"), "[x]");
        assert_eq!(display_value(&toggle, "false"), "[ ]");
    }
}
