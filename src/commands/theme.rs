//! Theme command - show or set the dark-mode preference.

use anyhow::{Context, Result};
use clap::Args;

use qrstudio::history::Preferences;

use super::{AppContext, CommandExecutor};

/// Show or set the studio color theme.
#[derive(Args, Debug)]
pub struct ThemeCommand {
    /// Use the dark theme
    #[arg(long, conflicts_with = "light")]
    pub dark: bool,

    /// Use the light theme
    #[arg(long)]
    pub light: bool,
}

impl CommandExecutor for ThemeCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut prefs = Preferences::new(ctx.store());

        if self.dark || self.light {
            prefs
                .set_dark_mode(self.dark)
                .context("Failed to save theme preference")?;
        }

        let theme = match prefs.dark_mode().context("Failed to read theme preference")? {
            Some(true) => "dark",
            Some(false) => "light",
            None => "light (default)",
        };
        println!("Theme: {}", theme);
        Ok(())
    }
}
