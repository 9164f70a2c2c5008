mod schema;
pub mod validation;

pub use schema::{CatalogConfig, Config};
pub use validation::validate_config;

use crate::catalog::{defaults, Catalog, CatalogError};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/nas-score/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from(std::env::var("HOME").unwrap_or_default()))
        .join(".config")
        .join("nas-score")
}

/// Get the default config file path (~/.config/nas-score/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to built-in defaults when that file doesn't exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let p = get_config_path();
            if !p.exists() {
                tracing::debug!(path = %p.display(), "no config file, using built-in defaults");
                return Ok(Config::default());
            }
            p
        }
    };

    parse_config_file(&config_path)
}

fn parse_config_file(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

impl Config {
    /// Configured facilities, or the built-in list
    pub fn facilities(&self) -> Vec<String> {
        match &self.facilities {
            Some(list) => list.clone(),
            None => defaults::FACILITIES.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// The configured catalog, or the built-in NAS table
    pub fn build_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            Some(c) => Catalog::new(c.items.clone(), c.order.clone(), c.exclusion_groups.clone()),
            None => Ok(Catalog::builtin()),
        }
    }

    /// Store directory: explicit override, then `data_dir`, then the platform default
    pub fn store_path(&self, override_dir: Option<PathBuf>) -> PathBuf {
        override_dir
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(crate::store::get_store_path)
    }
}
