//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod check;
mod generate;
mod history;
mod options;
mod read;
mod settings;
mod studio;
mod theme;

pub use check::CheckCommand;
pub use generate::GenerateCommand;
pub use history::HistoryCommand;
pub use options::{ContentArgs, StyleArgs};
pub use read::ReadCommand;
pub use settings::SettingsCommand;
pub use studio::StudioCommand;
pub use theme::ThemeCommand;

use std::path::PathBuf;

use anyhow::Result;

use qrstudio::history::FileStore;
use qrstudio::settings::Settings;

/// State shared by all commands: where data lives and the loaded settings.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub data_dir: PathBuf,
    pub settings: Settings,
}

impl AppContext {
    /// Key-value store for history and preferences.
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }
}

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self, ctx: &AppContext) -> Result<()>;
}
