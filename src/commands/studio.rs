//! Studio command - interactive terminal editor with live preview.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use qrstudio::debounce::Debouncer;
use qrstudio::history::{FileStore, History, Preferences};
use qrstudio::studio::Studio;
use qrstudio::tui::{
    handle_key_event, init_terminal, render, restore_terminal, App, Event, EventHandler, KeyAction,
};

use super::{AppContext, CommandExecutor};

/// Open the interactive studio.
///
/// Type into the form on the left; the preview, capacity gauge and checks
/// on the right follow as you type.
#[derive(Args, Debug)]
pub struct StudioCommand {
    /// Directory for PNG (Ctrl+E) and SVG (Ctrl+G) exports
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// Refresh delay after typing, in milliseconds (default: from settings)
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

impl CommandExecutor for StudioCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let studio = Studio::new(&ctx.settings);
        let history = History::load(ctx.store()).context("Failed to load history")?;
        let prefs = Preferences::new(ctx.store());
        let mut app = App::new(studio, history, prefs).context("Failed to read preferences")?;

        let delay = self
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| ctx.settings.debounce());

        let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        runtime.block_on(run_studio(&mut app, delay, &self.export_dir))
    }
}

/// Sets up the terminal, runs the loop and always restores the terminal.
async fn run_studio(app: &mut App<FileStore>, delay: Duration, export_dir: &Path) -> Result<()> {
    let mut terminal = init_terminal().context("Failed to initialize terminal")?;

    let mut events = EventHandler::new();
    EventHandler::spawn_reader(events.sender(), Duration::from_millis(250));
    let mut debouncer = Debouncer::new(delay, events.sender());
    info!(delay_ms = delay.as_millis() as u64, "studio started");

    let result = run_tui_loop(&mut terminal, app, &mut events, &mut debouncer, export_dir).await;

    restore_terminal(&mut terminal).context("Failed to restore terminal")?;
    result
}

/// Inner TUI loop.
async fn run_tui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<FileStore>,
    events: &mut EventHandler,
    debouncer: &mut Debouncer<Event>,
    export_dir: &Path,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        let Some(event) = events.next().await else {
            // Event channel closed
            return Ok(());
        };

        match event {
            Event::Key(key) => {
                app.status = None;
                match handle_key_event(app, key, export_dir) {
                    KeyAction::Quit => {
                        debouncer.cancel();
                        return Ok(());
                    }
                    KeyAction::Edited => debouncer.schedule(Event::Refresh),
                    KeyAction::Changed => {
                        debouncer.cancel();
                        app.refresh_preview();
                    }
                    KeyAction::None => {}
                }
            }
            Event::Refresh => app.refresh_preview(),
            Event::Resize(_, _) | Event::Tick => {
                // Terminal will redraw on next iteration
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
