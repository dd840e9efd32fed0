//! Settings command - show the effective settings or write `settings.toml`.

use anyhow::{bail, Context, Result};
use clap::Args;

use qrstudio::settings::Settings;

use super::{AppContext, CommandExecutor};

/// Show the effective settings, or write them to `settings.toml`.
#[derive(Args, Debug)]
pub struct SettingsCommand {
    /// Write the effective settings to settings.toml in the data directory
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing settings.toml
    #[arg(long, requires = "init")]
    pub force: bool,
}

impl CommandExecutor for SettingsCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let path = Settings::path(&ctx.data_dir);

        if self.init {
            if path.exists() && !self.force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            ctx.settings
                .save(&ctx.data_dir)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Settings written to {}", path.display());
            return Ok(());
        }

        let content = ctx.settings.to_toml().context("Failed to format settings")?;
        println!("# {}", path.display());
        print!("{}", content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn context(dir: &std::path::Path) -> AppContext {
        let mut settings = Settings::default();
        settings.debounce_ms = 90;
        AppContext {
            data_dir: dir.join("data"),
            settings,
        }
    }

    #[test]
    fn test_init_writes_effective_settings() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        let init = SettingsCommand { init: true, force: false };
        init.execute(&ctx).unwrap();

        let loaded = Settings::load(&ctx.data_dir).unwrap();
        assert_eq!(loaded, ctx.settings);
    }

    #[test]
    fn test_init_keeps_existing_file_without_force() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        SettingsCommand { init: true, force: false }.execute(&ctx).unwrap();

        assert!(SettingsCommand { init: true, force: false }.execute(&ctx).is_err());
        assert!(SettingsCommand { init: true, force: true }.execute(&ctx).is_ok());
    }
}
