use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_REMINDER_URL: &str = "http://localhost:3000";

pub const REMINDER_URL_ENV: &str = "REMINDER_API_URL";
pub const OPENWEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Credentials for the OpenWeather API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    pub api_key: String,
}

/// Client-side configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// reminder_url = "http://localhost:3000"
///
/// [openweather]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Base URL of the reminder service.
    pub reminder_url: Option<String>,

    pub openweather: Option<OpenWeatherConfig>,
}

impl Config {
    /// Reminder service base URL, falling back to the local default.
    pub fn reminder_url(&self) -> &str {
        self.reminder_url.as_deref().unwrap_or(DEFAULT_REMINDER_URL)
    }

    pub fn set_reminder_url(&mut self, url: String) {
        self.reminder_url = Some(url);
    }

    pub fn set_openweather_api_key(&mut self, api_key: String) {
        self.openweather = Some(OpenWeatherConfig { api_key });
    }

    pub fn openweather_api_key(&self) -> Option<&str> {
        self.openweather
            .as_ref()
            .map(|cfg| cfg.api_key.as_str())
            .filter(|key| !key.is_empty())
    }

    /// API key or an error explaining how to configure one.
    pub fn require_openweather_api_key(&self) -> Result<&str> {
        self.openweather_api_key().ok_or_else(|| {
            anyhow!(
                "No OpenWeather API key configured.\n\
                 Hint: run `weather-reminder configure` or set {OPENWEATHER_API_KEY_ENV}."
            )
        })
    }

    /// Non-empty values from the environment take precedence over the file.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(REMINDER_URL_ENV) {
            self.set_reminder_url(url);
        }
        if let Some(key) = non_empty(OPENWEATHER_API_KEY_ENV) {
            self.set_openweather_api_key(key);
        }
    }

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

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
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
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-reminder", "weather-reminder")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
