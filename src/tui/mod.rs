//! Terminal studio.
//!
//! An interactive editor with type tabs, a field form, style controls, a
//! live preview, capacity gauge, checks and history, built on ratatui.

mod app;
pub mod event;
mod ui;

pub use app::{App, Focus, Preview, StyleRow, BG_PRESETS, FG_PRESETS};
pub use event::{handle_key_event, Event, EventHandler, KeyAction};
pub use ui::{preview_lines, render};

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Initialize the terminal for TUI mode.
pub fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Restore the terminal to normal mode.
pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
