use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Backend limit for `limit` query values.
const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8001".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub page_size: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { page_size: 100 }
    }
}

// ── File I/O ────────────────────────────────────────────────────────────

pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("worklens"))
}

/// Load config from `~/.config/worklens/worklens.toml`.
///
/// Missing or unreadable files fall back to defaults; the
/// `WORKLENS_SERVER_URL` env var overrides the file's server URL either way.
pub fn load_config() -> Config {
    let config = config_dir()
        .map(|d| d.join("worklens.toml"))
        .ok()
        .and_then(|path| std::fs::read_to_string(path).ok())
        .map(|s| parse_config(&s))
        .unwrap_or_default();

    with_env_url(config, std::env::var("WORKLENS_SERVER_URL").ok())
}

/// Save config to `~/.config/worklens/worklens.toml`.
pub fn save_config(config: &Config) -> Result<()> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("worklens.toml");
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Log file used by the tracing subscriber (the terminal itself is owned by
/// the UI, so diagnostics go to a file).
pub fn log_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("worklens.log"))
}

fn parse_config(content: &str) -> Config {
    let mut config: Config = toml::from_str(content).unwrap_or_default();
    config.ui.page_size = config.ui.page_size.clamp(1, MAX_PAGE_SIZE);
    config
}

fn with_env_url(mut config: Config, env_url: Option<String>) -> Config {
    if let Some(url) = env_url {
        if !url.trim().is_empty() {
            config.server.url = url.trim().to_string();
        }
    }
    config
}
