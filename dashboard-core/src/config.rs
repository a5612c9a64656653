use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::provider::openweather::CURRENT_WEATHER_URL;

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const CONNECTION_STRING_ENV: &str = "AZURE_STORAGE_CONNECTION_STRING";

pub const DEFAULT_CONTAINER: &str = "weather-data";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// openweather_api_key = "..."
/// storage_connection_string = "DefaultEndpointsProtocol=https;AccountName=...;AccountKey=..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub openweather_api_key: Option<String>,
    pub storage_connection_string: Option<String>,

    /// Blob container name, `weather-data` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    /// Current-weather endpoint override, mostly useful against a local mock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openweather_endpoint: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay values from the environment; set, non-empty variables win over the file.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(API_KEY_ENV) {
            self.openweather_api_key = Some(key);
        }
        if let Some(conn) = lookup(CONNECTION_STRING_ENV) {
            self.storage_connection_string = Some(conn);
        }

        self
    }

    /// Settings file plus process environment.
    pub fn resolve() -> Result<Self> {
        Ok(Self::load()?.with_env_overrides(|name| std::env::var(name).ok()))
    }

    pub fn api_key(&self) -> Option<&str> {
        self.openweather_api_key.as_deref()
    }

    pub fn connection_string(&self) -> Option<&str> {
        self.storage_connection_string.as_deref()
    }

    pub fn container(&self) -> &str {
        self.container.as_deref().unwrap_or(DEFAULT_CONTAINER)
    }

    pub fn endpoint(&self) -> &str {
        self.openweather_endpoint.as_deref().unwrap_or(CURRENT_WEATHER_URL)
    }
}
