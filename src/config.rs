//! Configuration loading
//!
//! Optional TOML file at `<config_home>/carteira/config.toml`. A missing file
//! means defaults; a malformed file is an error.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_QUOTE_TIMEOUT_SECS: u64 = 10;

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the CSV lot table
    pub data_file: PathBuf,
    /// Upper bound for a single quote fetch
    pub quote_timeout: Duration,
}

/// On-disk layout; every field optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_file: Option<PathBuf>,
    quote_timeout_secs: Option<u64>,
}

/// Base directory for carteira files (~/.config/carteira on XDG systems)
pub fn config_dir() -> Result<PathBuf> {
    let dir = dir_spec::config_home()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(dir.join("carteira"))
}

impl Config {
    pub fn load() -> Result<Self> {
        let dir = config_dir()?;
        let config_path = dir.join("config.toml");

        // CARTEIRA_DATA_FILE overrides the configured lot table path
        let env_data_file = std::env::var_os("CARTEIRA_DATA_FILE").map(PathBuf::from);

        let file: FileConfig = if config_path.exists() {
            let raw = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config at {:?}", config_path))?;
            toml::from_str(&raw)
                .with_context(|| format!("Failed to parse config at {:?}", config_path))?
        } else {
            FileConfig::default()
        };

        let mut config = Self::from_file_config(file, dir);
        if let Some(path) = env_data_file {
            config.data_file = path;
        }
        Ok(config)
    }

    fn from_file_config(file: FileConfig, dir: PathBuf) -> Self {
        Self {
            data_file: file.data_file.unwrap_or_else(|| dir.join("lots.csv")),
            quote_timeout: Duration::from_secs(
                file.quote_timeout_secs.unwrap_or(DEFAULT_QUOTE_TIMEOUT_SECS),
            ),
        }
    }
}
