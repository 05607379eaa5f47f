//! Front-end configuration.
//!
//! An explicit value passed into the components that need it; there is no
//! process-wide singleton. Stored as JSON in the platform data directory
//! and overridable per invocation from the CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "beeline";
const CONFIG_FILE: &str = "config.json";

/// Settings shared by the write and read paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Engine address, host:port
    #[serde(default = "default_host")]
    pub host: String,

    /// Engine index name all requests address
    #[serde(default = "default_index")]
    pub index: String,

    /// Results per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Context lines shown around each best-matching line
    #[serde(default = "default_context_radius")]
    pub context_radius: u32,
}

fn default_host() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_index() -> String {
    "code".to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_context_radius() -> u32 {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            index: default_index(),
            page_size: default_page_size(),
            context_radius: default_context_radius(),
        }
    }
}

impl Config {
    /// Load config from the data directory, or return defaults if absent
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if config_path.exists() {
            let content =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let config: Config =
                serde_json::from_str(&content).context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the data directory
    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content).context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}
