use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants;
use crate::error::{MapError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub map: MapSettings,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Rendering settings handed to the display controller.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub namespace: String,
    pub sidebar_height: u32,
    pub panel_height: u32,
    pub toggle_label: String,
    pub library_url: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            namespace: constants::DEFAULT_JS_NAMESPACE.to_string(),
            sidebar_height: constants::SIDEBAR_HEIGHT,
            panel_height: constants::PANEL_HEIGHT,
            toggle_label: constants::TOGGLE_LABEL.to_string(),
            library_url: constants::DEFAULT_LIBRARY_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 6543,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_prefix: "map-widget.log".to_string(),
        }
    }
}

impl Config {
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            MapError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config = Self::from_toml(&config_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults. `PORT`
    /// overrides the configured server port.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };

        if let Some(port) = std::env::var("PORT").ok().and_then(|s| s.parse().ok()) {
            config.server.port = port;
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.map.namespace.trim().is_empty() {
            return Err(MapError::Config("map.namespace must not be empty".to_string()));
        }
        if self.map.sidebar_height == 0 || self.map.panel_height == 0 {
            return Err(MapError::Config("map heights must be positive".to_string()));
        }
        Ok(())
    }
}
