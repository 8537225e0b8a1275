//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod inspect;

use std::path::PathBuf;

use anyhow::Context;
use netpay_core::BatchConfig;

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

pub fn config_path(path: Option<&str>) -> PathBuf {
    PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_PATH))
}

pub fn load_config(path: Option<&str>) -> anyhow::Result<BatchConfig> {
    Ok(BatchConfig::from_file(&config_path(path))?)
}

/// Staging directory under the user's home directory.
pub fn temp_dir(config: &BatchConfig) -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(config.temp_dir(&home))
}
