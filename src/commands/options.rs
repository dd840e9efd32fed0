//! Arguments shared by the commands that build a code.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use qrstudio::color::HexColor;
use qrstudio::payload::{fields_for, ContentType};
use qrstudio::qr::{DotStyle, EcLevel, EyeStyle, GradientType};
use qrstudio::studio::Studio;

/// What to encode.
#[derive(Args, Debug)]
pub struct ContentArgs {
    /// Content type: url, text, email, phone, sms, wifi, vcard
    pub content_type: ContentType,

    /// Field value as key=value (repeatable), e.g. -f ssid=Home -f password=secret
    #[arg(short = 'f', long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

impl ContentArgs {
    /// Selects the content type and fills in the given fields.
    pub fn apply(&self, studio: &mut Studio) -> Result<()> {
        studio.select_type(self.content_type);

        for pair in &self.fields {
            let Some((key, value)) = pair.split_once('=') else {
                let names: Vec<&str> = fields_for(self.content_type).iter().map(|f| f.name).collect();
                bail!(
                    "Invalid field '{}': expected KEY=VALUE (fields for {}: {})",
                    pair,
                    self.content_type,
                    names.join(", ")
                );
            };
            studio
                .set_field(key.trim(), value)
                .with_context(|| format!("Cannot set field '{}'", key))?;
        }
        Ok(())
    }
}

/// How the code looks. Unset flags keep the configured defaults.
#[derive(Args, Debug, Default)]
pub struct StyleArgs {
    /// Error correction level: L, M, Q or H
    #[arg(long = "ec")]
    pub error_correction: Option<EcLevel>,

    /// Dot style: square, rounded, dots, classy, classy-rounded, extra-rounded
    #[arg(long)]
    pub dots: Option<DotStyle>,

    /// Eye style: square, extra-rounded, dot
    #[arg(long)]
    pub eyes: Option<EyeStyle>,

    /// Foreground color (#rrggbb)
    #[arg(long)]
    pub fg: Option<HexColor>,

    /// Background color (#rrggbb)
    #[arg(long)]
    pub bg: Option<HexColor>,

    /// Fade dots from the foreground to this color (#rrggbb)
    #[arg(long, value_name = "COLOR")]
    pub gradient: Option<HexColor>,

    /// Use a radial instead of a linear gradient
    #[arg(long, requires = "gradient")]
    pub radial: bool,

    /// Image to place in the center
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Canvas size in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Margin around the code in pixels
    #[arg(long)]
    pub margin: Option<u32>,
}

impl StyleArgs {
    /// Applies the given flags. Returns whether attaching the logo raised
    /// the error correction level, which only happens without `--ec`.
    pub fn apply(&self, studio: &mut Studio) -> bool {
        let config = studio.config().clone();

        if let Some(level) = self.error_correction {
            studio.set_ec_level(level);
        }
        if let Some(style) = self.dots {
            studio.set_dot_style(style);
        }
        if let Some(style) = self.eyes {
            studio.set_eye_style(style);
        }
        if self.fg.is_some() || self.bg.is_some() {
            studio.set_colors(
                self.fg.unwrap_or(config.fg_color),
                self.bg.unwrap_or(config.bg_color),
            );
        }
        if let Some(color2) = self.gradient {
            let kind = if self.radial {
                GradientType::Radial
            } else {
                GradientType::Linear
            };
            studio.set_gradient(true, color2, kind);
        }
        if let Some(size) = self.size {
            studio.set_size(size);
        }
        if let Some(margin) = self.margin {
            studio.set_margin(margin);
        }

        match &self.logo {
            Some(path) if self.error_correction.is_some() => {
                studio.set_logo(path.clone());
                false
            }
            Some(path) => studio.attach_logo(path.clone()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrstudio::settings::Settings;
    use std::path::Path;

    fn logo_args(level: Option<EcLevel>) -> StyleArgs {
        StyleArgs {
            error_correction: level,
            logo: Some(PathBuf::from("x.png")),
            ..Default::default()
        }
    }

    #[test]
    fn test_logo_upgrades_default_level() {
        let mut studio = Studio::new(&Settings::default());
        assert!(logo_args(None).apply(&mut studio));
        assert_eq!(studio.config().error_correction, EcLevel::H);
        assert_eq!(studio.config().logo.as_deref(), Some(Path::new("x.png")));
    }

    #[test]
    fn test_explicit_level_survives_logo() {
        for level in [EcLevel::L, EcLevel::M] {
            let mut studio = Studio::new(&Settings::default());
            assert!(!logo_args(Some(level)).apply(&mut studio));
            assert_eq!(studio.config().error_correction, level);
            assert_eq!(studio.config().logo.as_deref(), Some(Path::new("x.png")));
        }
    }

    #[test]
    fn test_content_args_reject_bare_value() {
        let args = ContentArgs {
            content_type: ContentType::Wifi,
            fields: vec!["Home".to_string()],
        };
        let err = args.apply(&mut Studio::new(&Settings::default())).unwrap_err();
        assert!(err.to_string().contains("ssid"));
    }
}
