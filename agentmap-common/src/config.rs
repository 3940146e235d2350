//! Configuration loading and data path resolution
//!
//! Bootstrap configuration comes from an optional TOML file. A missing file
//! never stops a tool from starting; built-in defaults apply instead.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::{Error, Result};

/// Environment variable naming the catalog document
pub const DATA_ENV_VAR: &str = "AGENTMAP_DATA";

/// Compiled default catalog location (relative to the working directory)
pub const DEFAULT_DATA_PATH: &str = "data/companies.json";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Catalog document path (optional)
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Cards per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            page_size: default_page_size(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_page_size() -> usize {
    12
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Platform config file location: `<config dir>/agentmap/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("agentmap").join("config.toml"))
}

/// Load TOML configuration
///
/// A missing file yields defaults (with a warning). A file that exists but
/// does not parse is a configuration error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file {} not found, using built-in defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Resolve the catalog document path
///
/// Priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable `AGENTMAP_DATA`
/// 3. `data_path` from the TOML config
/// 4. Compiled default (fallback)
pub fn resolve_data_path(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATA_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.data_path {
        return path.clone();
    }

    PathBuf::from(DEFAULT_DATA_PATH)
}
