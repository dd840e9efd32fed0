//! QR code reading command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use qrstudio::qr::read_qr_from_file;

use super::{AppContext, CommandExecutor};

/// Read a QR code from an image and print its payload.
#[derive(Args, Debug)]
pub struct ReadCommand {
    /// Path to image containing QR code
    pub input: PathBuf,
}

impl CommandExecutor for ReadCommand {
    fn execute(&self, _ctx: &AppContext) -> Result<()> {
        let payload = read_qr_from_file(&self.input)
            .with_context(|| format!("Failed to read QR code from {}", self.input.display()))?;

        println!("{}", payload);
        Ok(())
    }
}
