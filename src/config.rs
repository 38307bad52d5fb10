//! Configuration handling for the forecast provider credentials.
//!
//! The API key is resolved from the `METEOBLUE_API_KEY` environment variable
//! first, then from a TOML file at `<config_dir>/perucast/config.toml`:
//!
//! ```toml
//! api_key = "your-meteoblue-key"
//! ```
//!
//! A missing key is not a load error; it becomes a configuration failure
//! when the forecast client is constructed, before any fetch attempt.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

const ENV_API_KEY: &str = "METEOBLUE_API_KEY";
const CONFIG_DIR_NAME: &str = "perucast";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine platform config directory")]
    ConfigDirResolution,

    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] toml::de::Error),
}

/// On-disk configuration for the forecast provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Meteoblue API key. `None` until the user configures one.
    pub api_key: Option<String>,
}

impl Config {
    /// Loads configuration, preferring the environment over the config file.
    ///
    /// Returns an empty default when neither source is present; only an
    /// unreadable or unparseable config file is an error.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            if !key.trim().is_empty() {
                return Ok(Config { api_key: Some(key) });
            }
        }

        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&path).map_err(|e| ConfigError::Read(path.clone(), e))?;
        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.clone(), e))?;
        Ok(config)
    }

    /// Path to the config file, e.g. `~/.config/perucast/config.toml`.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or(ConfigError::ConfigDirResolution)
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}
