use crate::search::ScoringConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persistent settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Campaign snapshot used when `--data` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Pick the campaign snapshot: explicit path wins over the configured one
    pub fn resolve_data_file(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.data_file.clone())
    }
}

/// Get the path to the default configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;

    Ok(config_dir.join("dmhero-search").join("config.json"))
}

fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => config_path(),
    }
}

/// Load the configuration, falling back to defaults when the file is missing
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = resolve_path(path)?;

    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: AppConfig = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    Ok(config)
}

/// Save the configuration to disk, returning where it was written
pub fn save_config(config: &AppConfig, path: Option<&Path>) -> Result<PathBuf> {
    let path = resolve_path(path)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let data = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(&path, data).context("Failed to write config file")?;

    Ok(path)
}
