use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{TableError, TableResult};

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "confluence-table";

pub const ENV_USERNAME: &str = "CONFLUENCE_USERNAME";
pub const ENV_PASSWORD: &str = "CONFLUENCE_PASSWORD";
pub const ENV_BASE_URL: &str = "CONFLUENCE_BASE_URL";
pub const ENV_PAGE_ID: &str = "CONFLUENCE_PAGE_ID";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub confluence: ConfluenceConfig,
}

/// `[confluence]` table. There is no password field; it only comes
/// from the command line or the environment.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfluenceConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub page_id: Option<String>,
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            candidates.push(parent.join(CONFIG_FILE));
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(CONFIG_FILE));
    }
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(APP_DIR).join(CONFIG_FILE));
    }
    candidates
}

fn resolve_config_path(explicit: Option<&Path>) -> TableResult<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(TableError::Config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let found = candidate_paths().into_iter().find(|p| p.exists());
    match &found {
        Some(path) => tracing::debug!(path = %path.display(), "config found"),
        None => tracing::debug!("no config.toml found, using command line and environment only"),
    }
    Ok(found)
}

pub fn parse_config(content: &str) -> TableResult<AppConfig> {
    Ok(toml::from_str(content)?)
}

/// Load `config.toml` from `explicit`, or from the first default location that
/// has one. A missing default file yields an empty config.
pub fn load_config(explicit: Option<&Path>) -> TableResult<AppConfig> {
    let Some(path) = resolve_config_path(explicit)? else {
        return Ok(AppConfig::default());
    };
    let content = std::fs::read_to_string(&path)?;
    let config = parse_config(&content)?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}
