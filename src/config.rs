use std::{fs, io::ErrorKind, path::Path};

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub address: String,
    pub data_path: String,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:7878".to_string(),
            data_path: "cafes.json".to_string(),
            log_level: Level::INFO,
        }
    }
}

impl Config {
    pub fn from_config(config: String) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(&config)?)
    }

    /// Reads the config file at `path`. Returns `Ok(None)` if there is no such file.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(config) => Self::from_config(config).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum Level {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<Level> for tracing::Level {
    fn from(value: Level) -> Self {
        match value {
            Level::TRACE => tracing::Level::TRACE,
            Level::DEBUG => tracing::Level::DEBUG,
            Level::INFO => tracing::Level::INFO,
            Level::WARN => tracing::Level::WARN,
            Level::ERROR => tracing::Level::ERROR,
        }
    }
}
