//! Configuration management for atlas.
//!
//! Loads settings from `$ATLAS_CONFIG` or /etc/atlas/config.toml, falling
//! back to defaults. A `.env` file and the `OPENWEATHER_API_KEY` / `PORT`
//! environment variables override file values.

use crate::fetch::DEFAULT_TIMEOUT_SECS;
use crate::location::DEFAULT_LOCATION;
use crate::remote::weather::{WeatherSettings, OPENWEATHER_ENDPOINT, PLACEHOLDER_API_KEY};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/atlas/config.toml";

/// Environment variable naming an alternate config file
pub const CONFIG_PATH_ENV: &str = "ATLAS_CONFIG";

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const PORT_ENV: &str = "PORT";

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address, host:port
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Weather provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_api_key")]
    pub api_key: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// metric, imperial or standard
    #[serde(default = "default_units")]
    pub units: String,

    /// Location used when a weather query names none
    #[serde(default = "default_location")]
    pub default_location: String,
}

fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

fn default_endpoint() -> String {
    OPENWEATHER_ENDPOINT.to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            endpoint: default_endpoint(),
            units: default_units(),
            default_location: default_location(),
        }
    }
}

/// Outbound request settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Per-request timeout, no retries
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

/// Full atlas configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

impl AtlasConfig {
    /// Load config from file and environment, or return defaults
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }

        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| CONFIG_PATH.to_string());

        let mut config = Self::load_from_path(&path).unwrap_or_else(|e| {
            warn!("Config not found, using defaults: {:#}", e);
            AtlasConfig::default()
        });

        config.apply_overrides(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(PORT_ENV).ok(),
        );
        config
    }

    /// Load config from specific path
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AtlasConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save default config to path (for init)
    pub fn save_default(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(&AtlasConfig::default())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!("Saved default config to {}", path.display());
        Ok(())
    }

    /// Apply an API key and port taken from the environment
    pub fn apply_overrides(&mut self, api_key: Option<String>, port: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.weather.api_key = key;
        }

        if let Some(port) = port {
            match port.trim().parse::<u16>() {
                Ok(port) => {
                    let host = self
                        .server
                        .bind
                        .rsplit_once(':')
                        .map(|(host, _)| host)
                        .unwrap_or("127.0.0.1");
                    self.server.bind = format!("{}:{}", host, port);
                }
                Err(_) => warn!("Ignoring invalid {}={}", PORT_ENV, port),
            }
        }
    }

    pub fn weather_settings(&self) -> WeatherSettings {
        WeatherSettings {
            endpoint: self.weather.endpoint.clone(),
            api_key: self.weather.api_key.clone(),
            units: self.weather.units.clone(),
        }
    }
}
