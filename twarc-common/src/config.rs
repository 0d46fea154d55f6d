//! Configuration loading
//!
//! Bootstrap configuration comes from a single TOML file. Resolution order:
//! 1. Explicit path (command-line argument)
//! 2. `TWARC_CONFIG` environment variable
//! 3. `<platform config dir>/twarc/config.toml`
//! 4. Built-in defaults
//!
//! A missing file is not an error: defaults are used, and a requested but
//! missing file is reported as [`ConfigOrigin::MissingRequested`].
//! A file that exists but does not parse is `Error::Config`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TWARC_CONFIG";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Default unpacked archive directory for `aggregate`
    #[serde(default)]
    pub archive_dir: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Aggregation behavior (optional)
    #[serde(default)]
    pub aggregation: AggregationConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
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

fn default_log_level() -> String {
    "info".to_string()
}

/// Aggregation configuration
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct AggregationConfig {
    #[serde(default)]
    pub inferred_age_precedence: InferredAgePrecedence,
}

/// Which source wins when both the age file and the personalization file
/// carry an inferred age
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InferredAgePrecedence {
    /// Dedicated age source wins; personalization only fills a gap
    #[default]
    AgeSource,
    /// Personalization value wins whenever present
    Personalization,
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a file
    ///
    /// # Errors
    /// `Error::Io` if the file cannot be read, `Error::Config` if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Loaded from this file
    File(PathBuf),
    /// Explicitly requested file does not exist; defaults in use
    MissingRequested(PathBuf),
    /// No file requested and none at the platform location; defaults in use
    Defaults,
}

impl ConfigOrigin {
    /// Report the origin once logging is up
    pub fn log(&self) {
        match self {
            ConfigOrigin::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigOrigin::MissingRequested(path) => {
                warn!("Config file {} not found, using defaults", path.display())
            }
            ConfigOrigin::Defaults => debug!("No config file found, using defaults"),
        }
    }
}

/// `TWARC_CONFIG`, if set to a non-empty path
fn env_config_path() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV_VAR)
        .ok()
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

/// Resolve the configuration file path following the priority order above
///
/// Returns `None` when no candidate path is known.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Some(path) = env_config_path() {
        return Some(path);
    }

    // Priority 3: Platform config directory
    dirs::config_dir().map(|d| d.join("twarc").join("config.toml"))
}

/// Resolve and load configuration, falling back to defaults when no file exists
///
/// Nothing is logged here: binaries load configuration before the subscriber
/// exists, and call [`ConfigOrigin::log`] afterwards.
pub fn load_config(cli_arg: Option<&Path>) -> Result<(TomlConfig, ConfigOrigin)> {
    let Some(path) = resolve_config_path(cli_arg) else {
        return Ok((TomlConfig::default(), ConfigOrigin::Defaults));
    };

    if !path.exists() {
        let origin = if cli_arg.is_some() || env_config_path().is_some() {
            ConfigOrigin::MissingRequested(path)
        } else {
            ConfigOrigin::Defaults
        };
        return Ok((TomlConfig::default(), origin));
    }

    let config = TomlConfig::load(&path)?;
    Ok((config, ConfigOrigin::File(path)))
}
