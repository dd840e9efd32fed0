//! Application settings.
//!
//! Stored in `settings.toml` inside the data directory (`~/.qrstudio` by
//! default). A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::qr::QrConfig;

/// Settings file name inside the data directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Default quiet period before the preview re-renders.
pub const DEFAULT_DEBOUNCE_MS: u64 = 180;

/// Errors that can occur when loading or saving settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Data directory not found. Unable to determine home directory.")]
    NoDataDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Raise error correction to H when a logo is attached at L or M.
    pub auto_upgrade_ec: bool,

    /// Debounce delay for text edits in the studio, in milliseconds.
    pub debounce_ms: u64,

    /// Style applied to new codes.
    pub defaults: QrConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_upgrade_ec: true,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            defaults: QrConfig::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `data_dir`, or defaults if there is no file.
    pub fn load(data_dir: &Path) -> Result<Self, SettingsError> {
        let path = Self::path(data_dir);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Saves settings into `data_dir`, creating it if needed.
    pub fn save(&self, data_dir: &Path) -> Result<(), SettingsError> {
        fs::create_dir_all(data_dir)?;
        fs::write(Self::path(data_dir), self.to_toml()?)?;
        Ok(())
    }

    /// The settings as `settings.toml` content.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(SETTINGS_FILE)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Resolves the data directory: the explicit one if given, else
/// `~/.qrstudio`.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf, SettingsError> {
    match explicit {
        Some(dir) => Ok(dir),
        None => dirs::home_dir()
            .map(|home| home.join(".qrstudio"))
            .ok_or(SettingsError::NoDataDir),
    }
}
