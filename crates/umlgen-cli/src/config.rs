//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use umlgen::{UmlgenError, config::AppConfig};

/// Attempt cap applied to HTTP renders when the config does not set one.
pub const DEFAULT_MAX_LAYOUT_ATTEMPTS: usize = 100_000;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for UmlgenError {
    fn from(err: ConfigError) -> Self {
        UmlgenError::Config(err.to_string())
    }
}

/// Complete CLI configuration: the library sections plus `[server]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    #[serde(flatten)]
    pub app: AppConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Upper bound on placement attempts for a single request
    #[serde(default = "default_max_layout_attempts")]
    pub max_layout_attempts: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_layout_attempts: DEFAULT_MAX_LAYOUT_ATTEMPTS,
        }
    }
}

fn default_max_layout_attempts() -> usize {
    DEFAULT_MAX_LAYOUT_ATTEMPTS
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (umlgen/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds invalid colors
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<CliConfig, UmlgenError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("umlgen/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "umlgen", "umlgen") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(CliConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<CliConfig, UmlgenError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: CliConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    config
        .app
        .style()
        .validate()
        .map_err(ConfigError::Validation)?;
    if config.server.max_layout_attempts == 0 {
        return Err(ConfigError::Validation(
            "server.max_layout_attempts must be at least 1".to_string(),
        )
        .into());
    }

    Ok(config)
}
