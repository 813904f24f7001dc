//! Configuration management for pim-export

use crate::error::{PimError, Result};
use crate::traverse::NoteFilter;
use crate::window::{DEFAULT_LOOKBACK_DAYS, MAX_LOOKBACK_DAYS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Notes export settings
    pub notes: NotesConfig,
    /// Calendar export settings
    pub calendar: WindowConfig,
    /// Reminders export settings
    pub reminders: WindowConfig,
    /// Output settings
    pub output: OutputConfig,
    /// Scripting bridge settings
    pub bridge: BridgeConfig,
}

/// Notes-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Account names to skip (exact, case-sensitive)
    pub excluded_accounts: Vec<String>,
    /// Folder names to skip (exact, case-sensitive)
    pub excluded_folders: Vec<String>,
    /// Only export this folder
    pub target_folder: Option<String>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            excluded_accounts: Vec::new(),
            excluded_folders: vec!["Recently Deleted".to_string(), "最近删除".to_string()],
            target_folder: None,
        }
    }
}

impl NotesConfig {
    pub fn filter(&self) -> NoteFilter {
        NoteFilter {
            excluded_accounts: self.excluded_accounts.clone(),
            excluded_folders: self.excluded_folders.clone(),
            target_folder: self.target_folder.clone(),
        }
    }
}

/// Lookback window for calendar and reminders exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Days before now to include
    pub lookback_days: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory export logs are written to
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

/// Scripting bridge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// osascript program
    pub osascript: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            osascript: "osascript".to_string(),
        }
    }
}

impl Config {
    /// Default config location (platform config dir, falling back to ~/.pim-export)
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "pim-export", "pim-export")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".pim-export")
                    .join(CONFIG_FILE_NAME)
            })
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PimError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load a config file, or the defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the config, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (key, days) in [
            ("calendar.lookback_days", self.calendar.lookback_days),
            ("reminders.lookback_days", self.reminders.lookback_days),
        ] {
            if !(1..=MAX_LOOKBACK_DAYS).contains(&days) {
                return Err(PimError::Config(format!(
                    "{} must be between 1 and {}",
                    key, MAX_LOOKBACK_DAYS
                )));
            }
        }
        if self.bridge.osascript.trim().is_empty() {
            return Err(PimError::Config("bridge.osascript must not be empty".to_string()));
        }
        Ok(())
    }
}
