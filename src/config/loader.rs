//! Configuration loading.
//!
//! Reads a TOML file, deserializes it into [`ServerConfig`] and runs
//! semantic validation. An explicit path must exist; when no path is given
//! the default location is tried and a missing file falls back to the
//! built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate, ValidationError};

/// Config file consulted when no --config flag is given.
pub const DEFAULT_CONFIG_PATH: &str = "dashboard.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read.
    Io(std::io::Error),
    /// TOML syntax or type error.
    Parse(toml::de::Error),
    /// Semantic validation failed.
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config file: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "config validation failed:")?;
                for error in errors {
                    write!(f, "\n  - {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from an explicit path or the default location.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };

    if !required && !path.exists() {
        tracing::debug!("No config file found, using built-in defaults");
        let config = ServerConfig::default();
        validate(&config).map_err(ConfigError::Validation)?;
        return Ok(config);
    }

    let content = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ServerConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    validate(&config).map_err(ConfigError::Validation)?;
    tracing::info!(path = %path.display(), "Configuration loaded");
    Ok(config)
}
