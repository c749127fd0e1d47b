//! Configuration management for gator.
//!
//! The config lives in `~/.gatorconfig.json` and holds two values: where the
//! database is and which user is currently logged in. It is read in full at
//! startup and rewritten in full whenever the current user changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = ".gatorconfig.json";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub db_url: String,
    #[serde(default)]
    pub current_user_name: String,
    /// File this config was loaded from and is written back to.
    #[serde(skip)]
    path: PathBuf,
}

impl Config {
    /// A config with no current user that will be written to `path`.
    pub fn new(db_url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            db_url: db_url.into(),
            current_user_name: String::new(),
            path: path.into(),
        }
    }

    /// Load configuration from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_config_path()?;
        Self::load_from(path)
    }

    /// Load configuration from an explicit file.
    ///
    /// A missing or unreadable file is an error; gator does not create one.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            source: e,
        })?;

        let mut config: Config = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?;
        config.path = path;

        Ok(config)
    }

    /// Get the default config file path: `~/.gatorconfig.json`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point the config at `username` and persist it.
    ///
    /// The in-memory value only changes once the file has been written.
    pub fn set_current_user(&mut self, username: &str) -> Result<(), ConfigError> {
        let updated = Config {
            current_user_name: username.to_string(),
            ..self.clone()
        };
        updated.write()?;

        *self = updated;
        tracing::debug!("Current user set to {} in {}", username, self.path.display());
        Ok(())
    }

    fn write(&self) -> Result<(), ConfigError> {
        let data = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        fs::write(&self.path, data).map_err(|e| ConfigError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode config: {0}")]
    Serialize(serde_json::Error),
}
