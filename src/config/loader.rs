//! Configuration loading and discovery for `pxblend.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::BlendConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name searched for in the working directory and its parents
pub const CONFIG_FILE: &str = "pxblend.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pxblend.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error(
        "Config validation failed:\n{}",
        .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n")
    )]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override blend mode name
    pub mode: Option<String>,
    /// Override compositing operator name
    pub operator: Option<String>,
    /// Override opacity
    pub opacity: Option<f32>,
    /// Override parallel execution
    pub parallel: Option<bool>,
}

/// Find pxblend.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for pxblend.toml
/// 2. Check XDG_CONFIG_HOME/pxblend/pxblend.toml (or ~/.config/pxblend/pxblend.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pxblend.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pxblend").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find pxblend.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a pxblend.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
pub fn load_config(path: Option<&Path>) -> Result<BlendConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("Loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(BlendConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<BlendConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: BlendConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut BlendConfig, overrides: &CliOverrides) {
    if let Some(ref mode) = overrides.mode {
        config.defaults.mode = mode.clone();
    }

    if let Some(ref operator) = overrides.operator {
        config.defaults.operator = operator.clone();
    }

    if let Some(opacity) = overrides.opacity {
        config.defaults.opacity = opacity;
    }

    if let Some(parallel) = overrides.parallel {
        config.engine.parallel = parallel;
    }
}
