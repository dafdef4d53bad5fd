pub mod resolve;

pub use resolve::{StorageTarget, StorageTier, resolve_storage};

use crate::error::ConfigError;
use anyhow::Context;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Sentinel value in `database_path` meaning "non-persistent".
pub const MEMORY_SENTINEL: &str = ":memory:";

const CONFIG_DIR_NAME: &str = ".prompt-refiner";
const CONFIG_FILE_NAME: &str = "config.json";
const DATABASE_FILE_NAME: &str = "prompt_refiner.db";

/// On-disk configuration document (`~/.prompt-refiner/config.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.json - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// SQLite database location. Supports a leading `~` and the
    /// `":memory:"` sentinel.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Model override for the rewrite endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Optional API key. When absent the outbound call is sent without
    /// auth headers and the host environment is expected to supply them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_database_path() -> String {
    format!("~/{CONFIG_DIR_NAME}/{DATABASE_FILE_NAME}")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            database_path: default_database_path(),
            model: None,
            api_key: None,
        }
    }
}

impl Config {
    /// Load `~/.prompt-refiner/config.json`, writing a default document on
    /// first run. An unreadable or unparsable file degrades to the default
    /// config with a warning rather than failing the process.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let home = UserDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".into()))?;
        let config_dir = home.join(CONFIG_DIR_NAME);
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        Self::load_or_init_at(config_path)
    }

    /// Load from an explicit path (used by tests).
    pub fn load_or_init_at(config_path: PathBuf) -> Result<Self, ConfigError> {
        if config_path.exists() {
            let mut config = match Self::read_from(&config_path) {
                Ok(config) => config,
                Err(err) => {
                    warn!(path = %config_path.display(), error = %err, "config unreadable; using defaults");
                    Self::default()
                }
            };
            config.config_path = config_path;
            return Ok(config);
        }

        let mut config = Self::default();
        config.config_path.clone_from(&config_path);
        if let Err(err) = config.save() {
            warn!(path = %config_path.display(), error = %err, "could not write default config");
        }
        Ok(config)
    }

    fn read_from(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).context("read config file")?;
        serde_json::from_str(&contents).context("parse config file")
    }

    /// Persist the document to `config_path`.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|err| ConfigError::Load(err.to_string()))?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }

    /// `database_path` with the `~` shorthand expanded.
    pub fn expanded_database_path(&self) -> String {
        if self.database_path == MEMORY_SENTINEL {
            return self.database_path.clone();
        }
        shellexpand::tilde(&self.database_path).into_owned()
    }
}
