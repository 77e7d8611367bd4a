//! User configuration and data-directory resolution.

use chrono::format::{Item, StrftimeItems};
use eyre::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory name under the platform config/data dirs.
pub const APP_DIR: &str = "tasks";

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.yaml";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TASKS_DATA_DIR";

/// Settings read from `config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the database lives; platform data dir when unset
    pub data_dir: Option<PathBuf>,

    /// Database file name within the data directory
    pub db_file: String,

    /// strftime format for the Created column
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_file: crate::store::DB_FILE.to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// Directory the binary writes its log file into.
    pub fn log_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("logs")
    }

    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse YAML text. Empty text yields defaults.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content).context("Failed to parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.db_file.is_empty() {
            eyre::bail!("db_file cannot be empty");
        }
        if self.date_format.is_empty() {
            eyre::bail!("date_format cannot be empty");
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            eyre::bail!("date_format is not a valid strftime format: {}", self.date_format);
        }
        Ok(())
    }

    /// Resolve the data directory.
    ///
    /// Precedence: explicit override, `TASKS_DATA_DIR`, `data_dir` from the
    /// config, the platform data dir, the home dir, then `.`.
    pub fn resolve_data_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        let env_dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self.resolve_data_dir_with(cli_override, env_dir)
    }

    fn resolve_data_dir_with(&self, cli_override: Option<&Path>, env_dir: Option<PathBuf>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or(env_dir)
            .or_else(|| self.data_dir.clone())
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR)))
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Create the data directory and return the database path inside it.
    pub fn prepare_db_path(&self, data_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
        Ok(data_dir.join(&self.db_file))
    }
}
