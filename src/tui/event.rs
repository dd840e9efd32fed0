//! Event handling for the studio TUI.

use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use super::app::{App, Focus};
use crate::history::KvStore;
use crate::payload::FieldKind;
use crate::qr::QrFormat;

/// Application events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Terminal tick (for refreshing UI).
    Tick,
    /// Keyboard event.
    Key(KeyEvent),
    /// Terminal resize.
    Resize(u16, u16),
    /// Debounced request to recompute the preview.
    Refresh,
}

/// Event handler that reads terminal events in a separate task.
pub struct EventHandler {
    /// Sender to main loop.
    tx: mpsc::UnboundedSender<Event>,
    /// Receiver in main loop.
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Get a sender, for the reader task or the preview debouncer.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Receive the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Spawn the event reading task.
    pub fn spawn_reader(tx: mpsc::UnboundedSender<Event>, tick_rate: Duration) {
        tokio::task::spawn_blocking(move || loop {
            let event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                    Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                    _ => continue,
                }
            } else {
                Event::Tick
            };
            if tx.send(event).is_err() {
                break;
            }
        });
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed.
    None,
    /// Quit the application.
    Quit,
    /// Text was typed; refresh once typing settles.
    Edited,
    /// A discrete choice changed; refresh now.
    Changed,
}

/// Handle a key event and update app state.
///
/// `export_dir` receives PNG and SVG exports.
pub fn handle_key_event<S: KvStore>(app: &mut App<S>, key: KeyEvent, export_dir: &Path) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        // Quit on Ctrl+C or Ctrl+Q
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            app.should_quit = true;
            KeyAction::Quit
        }

        KeyCode::Esc => {
            app.should_quit = true;
            KeyAction::Quit
        }

        KeyCode::Char('s') if ctrl => {
            app.save();
            KeyAction::None
        }

        KeyCode::Char('e') if ctrl => {
            app.export(export_dir, QrFormat::Png);
            KeyAction::None
        }

        KeyCode::Char('g') if ctrl => {
            app.export(export_dir, QrFormat::Svg);
            KeyAction::None
        }

        KeyCode::Char('y') if ctrl => {
            app.copy_svg();
            KeyAction::None
        }

        KeyCode::Char('d') if ctrl => {
            app.toggle_dark();
            KeyAction::None
        }

        // Content type tabs
        KeyCode::Right if ctrl => {
            app.next_type();
            KeyAction::Changed
        }
        KeyCode::Left if ctrl => {
            app.prev_type();
            KeyAction::Changed
        }

        KeyCode::Tab => {
            app.cycle_focus();
            KeyAction::None
        }

        KeyCode::Up => {
            app.move_up();
            KeyAction::None
        }
        KeyCode::Down => {
            app.move_down();
            KeyAction::None
        }

        KeyCode::Delete if app.focus == Focus::History => {
            app.delete_selected();
            KeyAction::None
        }

        KeyCode::Enter => {
            let multiline = app
                .selected_field()
                .is_some_and(|f| f.kind == FieldKind::Multiline);
            if multiline {
                app.enter_char('\n');
                KeyAction::Edited
            } else if app.is_text_row() && app.focus == Focus::Content {
                app.move_down();
                KeyAction::None
            } else if app.activate() {
                KeyAction::Changed
            } else {
                KeyAction::None
            }
        }

        _ if app.is_text_row() => handle_text_key(app, key),

        KeyCode::Char(' ') | KeyCode::Right | KeyCode::Left => {
            if app.activate() {
                KeyAction::Changed
            } else {
                KeyAction::None
            }
        }

        _ => KeyAction::None,
    }
}

/// Editing keys for the selected text row.
fn handle_text_key<S: KvStore>(app: &mut App<S>, key: KeyEvent) -> KeyAction {
    // The logo path only applies on Enter.
    let edited = if app.focus == Focus::Content {
        KeyAction::Edited
    } else {
        KeyAction::None
    };

    match key.code {
        KeyCode::Backspace => {
            app.delete_char();
            edited
        }
        KeyCode::Delete => {
            app.delete_char_forward();
            edited
        }
        KeyCode::Left => {
            app.move_cursor_left();
            KeyAction::None
        }
        KeyCode::Right => {
            app.move_cursor_right();
            KeyAction::None
        }
        KeyCode::Home => {
            app.move_cursor_home();
            KeyAction::None
        }
        KeyCode::End => {
            app.move_cursor_end();
            KeyAction::None
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.enter_char(c);
            edited
        }
        _ => KeyAction::None,
    }
}
