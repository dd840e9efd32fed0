//! History command - list, export and remove saved codes.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use qrstudio::history::{History, HistoryEntry, KvStore, MAX_HISTORY};
use qrstudio::qr::{generate_qr_to_file, QrFormat, EXPORT_PNG_SIZE};

use super::{AppContext, CommandExecutor};

/// Manage saved codes.
///
/// The newest 20 codes are kept in the data directory.
#[derive(Args, Debug)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub action: HistoryAction,
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List saved codes, newest first
    List,

    /// Show one saved code
    Show(HistoryIdArgs),

    /// Render a saved code to a file
    Export(HistoryExportArgs),

    /// Delete one saved code
    Delete(HistoryIdArgs),

    /// Delete all saved codes
    Clear,
}

#[derive(Args, Debug)]
pub struct HistoryIdArgs {
    /// Entry id as shown by `history list`
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct HistoryExportArgs {
    /// Entry id as shown by `history list`
    pub id: i64,

    /// Output file (.svg, .png or .txt)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format: svg, png or ascii (default: from the file extension)
    #[arg(long)]
    pub format: Option<QrFormat>,
}

impl CommandExecutor for HistoryCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut history = History::load(ctx.store()).context("Failed to load history")?;

        match &self.action {
            HistoryAction::List => list_entries(&history),
            HistoryAction::Show(args) => show_entry(find(&history, args.id)?),
            HistoryAction::Export(args) => export_entry(find(&history, args.id)?, args),
            HistoryAction::Delete(args) => {
                if !history.remove(args.id).context("Failed to save history")? {
                    bail!("No history entry with id {}", args.id);
                }
                println!("Entry {} deleted.", args.id);
                Ok(())
            }
            HistoryAction::Clear => {
                let count = history.len();
                history.clear().context("Failed to clear history")?;
                println!("History cleared ({} entries removed).", count);
                Ok(())
            }
        }
    }
}

fn find<S: KvStore>(history: &History<S>, id: i64) -> Result<&HistoryEntry> {
    history
        .get(id)
        .with_context(|| format!("No history entry with id {}", id))
}

fn list_entries<S: KvStore>(history: &History<S>) -> Result<()> {
    if history.is_empty() {
        println!("No saved codes.");
        println!();
        println!("Save one with:");
        println!("  qrstudio generate url -f url=https://example.com --save");
        return Ok(());
    }

    println!("History ({}/{}):", history.len(), MAX_HISTORY);
    println!();
    for entry in history.entries() {
        println!(
            "  {}  {:<6}  {}  {}",
            entry.id,
            entry.content_type().label(),
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.label
        );
    }
    Ok(())
}

fn show_entry(entry: &HistoryEntry) -> Result<()> {
    let config = &entry.config;

    println!("Entry {}", entry.id);
    println!("  Type:    {}", entry.content_type().label());
    println!("  Label:   {}", entry.label);
    println!("  Created: {}", entry.timestamp.to_rfc3339());
    println!(
        "  Style:   EC {}, {} dots, {} eyes, {} on {}",
        config.error_correction,
        config.dot_style.as_str(),
        config.eye_style.as_str(),
        config.fg_color,
        config.bg_color
    );
    if let Some(logo) = &config.logo {
        println!("  Logo:    {}", logo.display());
    }
    println!("  Payload:");
    for line in entry.encoded.lines() {
        println!("    {}", line);
    }
    Ok(())
}

fn export_entry(entry: &HistoryEntry, args: &HistoryExportArgs) -> Result<()> {
    let format = args
        .format
        .or_else(|| QrFormat::from_path(&args.output))
        .unwrap_or_default();
    let mut config = entry.config.clone();
    if format == QrFormat::Png {
        config.size = EXPORT_PNG_SIZE;
    }

    generate_qr_to_file(&entry.encoded, &args.output, &config, Some(format))
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Exported \"{}\" to {}", entry.label, args.output.display());
    Ok(())
}
