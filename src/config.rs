use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::device::DeviceProfile;
use crate::engine::MIN_BRIGHTNESS;
use crate::error::{MenuError, Result};
use crate::menu::{Layout, Timing};
use crate::render::Palette;

/// Theme configuration - either a preset name or custom colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeConfig {
    /// Preset theme name
    Preset(String),
    /// Custom RGB565 palette
    Custom(Palette),
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig::Preset("purple".to_string())
    }
}

impl ThemeConfig {
    /// Resolve to actual colors; unknown presets fall back to the default
    pub fn resolve(&self) -> Palette {
        match self {
            ThemeConfig::Preset(name) => Palette::from_name(name).unwrap_or_default(),
            ThemeConfig::Custom(palette) => *palette,
        }
    }
}

/// Configuration settings for pocket-menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_device")]
    pub device: String,

    #[serde(default)]
    pub theme: ThemeConfig,

    /// Layout of submenus
    #[serde(default)]
    pub layout: Layout,

    #[serde(default = "default_delay_ms")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_delay_ms")]
    pub exit_delay_ms: u64,

    #[serde(default = "default_min_brightness")]
    pub min_brightness: u8,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log file path; the platform data directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_device() -> String {
    "cardputer".to_string()
}

fn default_delay_ms() -> u64 {
    200
}

fn default_min_brightness() -> u8 {
    MIN_BRIGHTNESS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: default_device(),
            theme: ThemeConfig::default(),
            layout: Layout::default(),
            settle_delay_ms: default_delay_ms(),
            exit_delay_ms: default_delay_ms(),
            min_brightness: default_min_brightness(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl Config {
    /// Get the config file path (~/.pocket-menu.json)
    pub fn config_file_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".pocket-menu.json"))
            .ok_or(MenuError::NoHomeDirectory)
    }

    /// Ensure the config file exists, creating it with defaults if not
    fn ensure_config_file(path: &Path) -> Result<()> {
        if !path.exists() {
            Config::default().save_to(path)?;
        }
        Ok(())
    }

    /// Load configuration from `path`, or the default location when `None`
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_file_path()?,
        };
        Self::ensure_config_file(&config_path)?;

        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, falling back to defaults with a warning on failure.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Warning: failed to load config: {err}, using defaults");
                Self::default()
            }
        }
    }

    /// Save the configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn profile(&self) -> Result<DeviceProfile> {
        DeviceProfile::by_name(&self.device)
    }

    pub fn palette(&self) -> Palette {
        self.theme.resolve()
    }

    pub fn timing(&self) -> Timing {
        Timing {
            settle: Duration::from_millis(self.settle_delay_ms),
            exit: Duration::from_millis(self.exit_delay_ms),
        }
    }

    /// Resolved log file location
    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }
        dirs::data_local_dir()
            .map(|dir| dir.join("pocket-menu").join("pocket-menu.log"))
            .ok_or(MenuError::NoHomeDirectory)
    }
}
