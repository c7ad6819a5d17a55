//! Global daylog configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{DaylogError, DaylogResult};
use crate::storage::{DEFAULT_EXPORT_FILE, DEFAULT_STORAGE_KEY};

static DEFAULT_DATA_PATH: &str = "~/.local/share/daylog";

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("daylog"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_export_file() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

/// Configuration at ~/.config/daylog/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DaylogConfig {
    /// Where the activity log is stored.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Slot name inside `data_dir`.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// File name used by `export` when no path is given.
    #[serde(default = "default_export_file")]
    pub export_file: String,
}

impl Default for DaylogConfig {
    fn default() -> Self {
        DaylogConfig {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
            export_file: default_export_file(),
        }
    }
}

impl DaylogConfig {
    /// Load the config, creating a commented-out default file on first run.
    pub fn load() -> DaylogResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> DaylogResult<Self> {
        let config: DaylogConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| DaylogError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaylogError::Config(e.to_string()))?;

        if config.storage_key.trim().is_empty() {
            return Err(DaylogError::Config("storage_key must not be empty".into()));
        }

        Ok(config)
    }

    pub fn config_path() -> DaylogResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaylogError::Config("Could not determine config directory".into()))?
            .join("daylog");

        Ok(config_dir.join("config.toml"))
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Save the current config to `path`.
    pub fn save(&self, path: &Path) -> DaylogResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DaylogError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| DaylogError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaylogResult<()> {
        let contents = format!(
            "\
# daylog configuration

# Where your activity log lives:
# data_dir = \"{}\"

# Name of the storage slot inside data_dir:
# storage_key = \"{}\"

# Default file name for `daylog export`:
# export_file = \"{}\"
",
            DEFAULT_DATA_PATH, DEFAULT_STORAGE_KEY, DEFAULT_EXPORT_FILE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaylogError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaylogError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
