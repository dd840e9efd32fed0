//! QR Studio - styled QR codes from the command line.
//!
//! Generates codes for URLs, text, email, phone numbers, SMS, Wi-Fi
//! networks and contact cards, with capacity and contrast checks, a local
//! history and an interactive terminal studio.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::{
    AppContext, CheckCommand, CommandExecutor, GenerateCommand, HistoryCommand, ReadCommand,
    SettingsCommand, StudioCommand, ThemeCommand,
};
use qrstudio::logging::{init_file_tracing, init_tracing};
use qrstudio::settings::{resolve_data_dir, Settings};

/// QR Studio - styled QR codes for links, Wi-Fi, contacts and more
#[derive(Parser)]
#[command(name = "qrstudio")]
#[command(version)]
#[command(about = "Generate styled QR codes with capacity and contrast checks")]
#[command(long_about = None)]
struct Cli {
    /// Directory for settings, history and preferences [default: ~/.qrstudio]
    #[arg(long, global = true, env = "QRSTUDIO_HOME")]
    data_dir: Option<PathBuf>,

    /// Verbose logging (QRSTUDIO_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a QR code
    ///
    /// Examples:
    ///   qrstudio generate url -f url=https://example.com -o site.svg
    ///   qrstudio generate wifi -f ssid=Home -f password=secret --dots dots -o wifi.png
    Generate(GenerateCommand),

    /// Show payload, capacity and warnings without rendering
    Check(CheckCommand),

    /// Read a QR code from an image
    Read(ReadCommand),

    /// Manage saved codes
    History(HistoryCommand),

    /// Show or set the color theme
    Theme(ThemeCommand),

    /// Show the effective settings or write settings.toml
    Settings(SettingsCommand),

    /// Open the interactive terminal studio
    Studio(StudioCommand),
}

impl Commands {
    fn executor(&self) -> &dyn CommandExecutor {
        match self {
            Commands::Generate(cmd) => cmd,
            Commands::Check(cmd) => cmd,
            Commands::Read(cmd) => cmd,
            Commands::History(cmd) => cmd,
            Commands::Theme(cmd) => cmd,
            Commands::Settings(cmd) => cmd,
            Commands::Studio(cmd) => cmd,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir).context("Failed to locate data directory")?;

    // The studio owns the terminal, so its logs go to a file.
    if matches!(cli.command, Commands::Studio(_)) {
        init_file_tracing(&data_dir.join("studio.log"), cli.verbose)?;
    } else {
        init_tracing(cli.verbose)?;
    }

    let settings = Settings::load(&data_dir)
        .with_context(|| format!("Failed to load {}", Settings::path(&data_dir).display()))?;
    let ctx = AppContext { data_dir, settings };

    cli.command.executor().execute(&ctx)
}
