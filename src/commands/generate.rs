//! QR code generation command.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use qrstudio::clipboard::{ClipboardSink, SystemClipboard};
use qrstudio::history::History;
use qrstudio::qr::{
    generate_qr, generate_qr_to_file, read_qr, symbol_info, QrConfig, QrFormat, EXPORT_PNG_SIZE,
};
use qrstudio::studio::Studio;

use super::{AppContext, CommandExecutor, ContentArgs, StyleArgs};

/// Generate a QR code from typed content.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub content: ContentArgs,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Output file (.svg, .png or .txt). Prints to the terminal if omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: svg, png or ascii (default: from the file extension)
    #[arg(long)]
    pub format: Option<QrFormat>,

    /// Save the code to history
    #[arg(long)]
    pub save: bool,

    /// Check that the styled code scans back to the same payload
    #[arg(long)]
    pub verify: bool,

    /// Copy the SVG markup to the clipboard
    #[arg(long)]
    pub copy: bool,
}

impl CommandExecutor for GenerateCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut studio = Studio::new(&ctx.settings);
        self.content.apply(&mut studio)?;
        if self.style.apply(&mut studio) {
            eprintln!("Note: error correction raised to H for the logo.");
        }

        let payload = studio.encoded();
        if payload.is_empty() {
            bail!("Enter content first: a required field for {} is missing", studio.content_type());
        }

        for warning in studio.warnings() {
            eprintln!("{:?}: {}", warning.severity, warning.message);
        }

        let info = symbol_info(&payload, studio.config().error_correction)
            .context("Failed to generate QR code")?;

        if self.verify {
            verify(&payload, studio.config())?;
        }

        match &self.output {
            Some(path) => {
                let format = self
                    .format
                    .or_else(|| QrFormat::from_path(path))
                    .unwrap_or_default();
                let mut config = studio.config().clone();
                if format == QrFormat::Png && self.style.size.is_none() {
                    config.size = EXPORT_PNG_SIZE;
                }

                generate_qr_to_file(&payload, path, &config, Some(format))
                    .with_context(|| format!("Failed to write {}", path.display()))?;

                let capacity = studio.capacity();
                println!("QR code generated: {}", path.display());
                println!("  Type: {}", studio.content_type().label());
                println!(
                    "  Payload: {} bytes ({}% of level {})",
                    capacity.bytes,
                    capacity.percent,
                    studio.config().error_correction
                );
                println!("  QR version: {} ({}x{} modules)", info.version, info.modules, info.modules);
            }
            None => {
                let format = self.format.unwrap_or(QrFormat::Ascii);
                let output = generate_qr(&payload, studio.config(), format)
                    .context("Failed to generate QR code")?;
                match output.as_string() {
                    Some(text) => println!("{}", text),
                    None => bail!("PNG output needs a file: use -o <file.png>"),
                }
            }
        }

        if self.copy {
            copy_svg(&studio, &mut SystemClipboard::new())?;
        }

        if self.save {
            if let Some(entry) = studio.snapshot() {
                let mut history =
                    History::load(ctx.store()).context("Failed to load history")?;
                let saved = history.push(entry).context("Failed to save history")?;
                eprintln!("Saved to history as {}", saved.id);
            }
        }

        Ok(())
    }
}

/// Puts the SVG markup on the clipboard. A missing clipboard is not fatal.
fn copy_svg(studio: &Studio, clipboard: &mut impl ClipboardSink) -> Result<bool> {
    let svg = studio
        .render(QrFormat::Svg)
        .context("Failed to generate QR code")?;
    let markup = svg.as_string().unwrap_or_default();
    match clipboard.set_text(markup) {
        Ok(()) => {
            eprintln!("SVG copied to clipboard.");
            Ok(true)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Clipboard copy failed");
            eprintln!("Clipboard unavailable, write the SVG with -o <file.svg> instead.");
            Ok(false)
        }
    }
}

/// Renders a PNG in memory and reads it back.
fn verify(payload: &str, config: &QrConfig) -> Result<()> {
    let image = generate_qr(payload, config, QrFormat::Png)
        .context("Failed to render QR code for verification")?
        .into_image()
        .context("Renderer returned no image")?;

    let decoded = read_qr(&image).context("Verification failed: the styled code does not scan")?;
    if decoded != payload {
        bail!("Verification failed: code scans as {:?}", decoded);
    }
    eprintln!("Verified: code scans back to the same payload.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrstudio::clipboard::{MemoryClipboard, NoClipboard};
    use qrstudio::settings::Settings;

    #[test]
    fn test_copy_svg_to_clipboard() {
        let studio = Studio::new(&Settings::default());
        let clipboard = MemoryClipboard::new();
        assert!(copy_svg(&studio, &mut clipboard.clone()).unwrap());
        assert!(clipboard.contents().unwrap().starts_with("<svg"));
    }

    #[test]
    fn test_copy_svg_without_clipboard_is_not_fatal() {
        let studio = Studio::new(&Settings::default());
        assert!(!copy_svg(&studio, &mut NoClipboard).unwrap());
    }
}
