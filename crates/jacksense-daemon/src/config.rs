//! Daemon configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Daemon settings
    #[serde(default)]
    pub daemon: DaemonConfig,
    /// Switch device settings
    #[serde(default)]
    pub device: DeviceConfig,
}

/// Daemon-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self { log_level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Switch device settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Directory scanned for event devices
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self { input_dir: default_input_dir() }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from(jacksense_evdev::DEFAULT_INPUT_DIR)
}

/// Load configuration from file or defaults.
///
/// An absent config file is not an error; every field has a default.
pub fn load_config() -> Result<Config> {
    let config_path = config_path()?;

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {config_path:?}"))?;
        parse_config(&content)
            .with_context(|| format!("Failed to parse config file: {config_path:?}"))
    } else {
        Ok(Config::default())
    }
}

fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Get the configuration file path.
fn config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "jacksense", "Jacksense")
        .context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}
