//! Capacity and contrast check command.

use anyhow::Result;
use clap::Args;

use qrstudio::qr::symbol_info;
use qrstudio::studio::Studio;
use qrstudio::validate::contrast_ratio;

use super::{AppContext, CommandExecutor, ContentArgs, StyleArgs};

/// Show the payload, capacity use and scannability warnings without rendering.
#[derive(Args, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    pub content: ContentArgs,

    #[command(flatten)]
    pub style: StyleArgs,
}

impl CommandExecutor for CheckCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut studio = Studio::new(&ctx.settings);
        self.content.apply(&mut studio)?;
        let upgraded = self.style.apply(&mut studio);

        let payload = studio.encoded();
        let capacity = studio.capacity();
        let config = studio.config();

        println!("Payload:");
        if payload.is_empty() {
            println!("  (empty)");
        } else {
            for line in payload.lines() {
                println!("  {}", line);
            }
        }
        println!();
        println!(
            "Capacity: {} / {} bytes ({}%) at level {}",
            capacity.bytes, capacity.max_bytes, capacity.percent, config.error_correction
        );
        if upgraded {
            println!("  (raised to H for the logo)");
        }
        if let Ok(info) = symbol_info(&payload, config.error_correction) {
            if !payload.is_empty() {
                println!("QR version: {} ({}x{} modules)", info.version, info.modules, info.modules);
            }
        }
        println!(
            "Contrast: {:.2}:1 ({} on {})",
            contrast_ratio(&config.fg_color, &config.bg_color),
            config.fg_color,
            config.bg_color
        );

        let warnings = studio.warnings();
        println!();
        if warnings.is_empty() {
            println!("No warnings.");
        } else {
            println!("Warnings ({}):", warnings.len());
            for warning in warnings {
                println!("  [{:?}] {}", warning.severity, warning.message);
            }
        }

        Ok(())
    }
}
