//! Application configuration.
//!
//! Defaults, overridden by an optional TOML file, overridden by environment
//! variables:
//!
//! - `SNOWFALL_CONFIG`: path to the TOML file (default `snowfall.toml` if present)
//! - `SNOWFALL_ASSETS`: directory holding the sprite images
//! - `SNOWFALL_LOG`: log filter used when `RUST_LOG` is unset

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::params::RenderParams;

pub const CONFIG_ENV: &str = "SNOWFALL_CONFIG";
pub const ASSETS_ENV: &str = "SNOWFALL_ASSETS";
pub const LOG_ENV: &str = "SNOWFALL_LOG";
pub const DEFAULT_CONFIG_FILE: &str = "snowfall.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    ParseError(String),
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Window width and height as a fraction of the primary monitor's.
    pub size_fraction: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Snowfall".to_string(),
            size_fraction: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub assets_dir: PathBuf,
    pub log_filter: String,
    pub window: WindowConfig,
    /// Initial values for the parameter panel.
    pub render: RenderParams,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            log_filter: "snowfall=info".to_string(),
            window: WindowConfig::default(),
            render: RenderParams::default(),
        }
    }
}

impl AppConfig {
    /// Load from file and environment, then validate.
    pub fn load() -> ConfigResult<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_toml_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_toml_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ASSETS_ENV) {
            self.assets_dir = PathBuf::from(dir);
        }
        if let Some(filter) = lookup(LOG_ENV) {
            self.log_filter = filter;
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let render = &self.render;
        if !RenderParams::get_size_range().contains(&render.size) {
            return Err(ConfigError::ValidationError(format!(
                "render.size {} outside {:?}",
                render.size,
                RenderParams::get_size_range()
            )));
        }
        if !RenderParams::get_opacity_range().contains(&render.opacity) {
            return Err(ConfigError::ValidationError(format!(
                "render.opacity {} outside {:?}",
                render.opacity,
                RenderParams::get_opacity_range()
            )));
        }
        if !(self.window.size_fraction > 0.0 && self.window.size_fraction <= 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "window.size_fraction {} must be in (0, 1]",
                self.window.size_fraction
            )));
        }
        Ok(())
    }
}
