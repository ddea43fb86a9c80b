//! Configuration file support

use anyhow::{Context, Result};
use hexdiff_core::{Algorithm, Encoding, Highlight, RenderConfig};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Settings read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub encoding: Encoding,
    pub style: Highlight,
    pub width: Option<NonZeroUsize>,
    pub algorithm: Algorithm,
}

impl Config {
    /// `<config dir>/hexdiff/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hexdiff").join("config.toml"))
    }

    /// Load an explicit config file, or the default one if it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            encoding: self.encoding,
            style: self.style,
            width: self.width,
        }
    }
}
