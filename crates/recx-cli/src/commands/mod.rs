//! Subcommands.

pub mod config;
pub mod extract;
pub mod schema;

use std::path::{Path, PathBuf};

use recx_core::RecxConfig;

/// Load the config file if one was given, otherwise defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RecxConfig> {
    let config = if let Some(path) = config_path {
        RecxConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e))?
    } else {
        RecxConfig::default()
    };
    Ok(config)
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recx")
        .join("config.json")
}
