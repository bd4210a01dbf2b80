use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{MediaQuality, RoomSettings};

/// Crate configuration: logging plus media defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" for development, "json" for production
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Quality preset applied when room settings do not name one
    pub default_quality: MediaQuality,
}

impl MediaConfig {
    /// Room settings for a title, carrying the configured default quality.
    pub fn room_settings(&self, title: impl Into<String>) -> RoomSettings {
        RoomSettings::new(title, self.default_quality)
    }
}

impl Config {
    /// Load from an optional TOML file plus `LIVECAST_`-prefixed
    /// environment overrides (`LIVECAST_LOGGING__LEVEL=debug`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder
            .add_source(Environment::with_prefix("LIVECAST").separator("__"))
            .build()?
            .try_deserialize()
    }
}
