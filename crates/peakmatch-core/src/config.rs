//! Quiz configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;

/// Top-level peakmatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakmatchConfig {
    /// Directory holding the history slot.
    #[serde(default = "default_history_dir")]
    pub history_dir: PathBuf,
    /// How long a wrong pair stays marked, in milliseconds.
    #[serde(default = "default_mismatch_delay")]
    pub mismatch_delay_ms: u64,
    /// Pause between the last match and the result screen, in milliseconds.
    #[serde(default = "default_result_delay")]
    pub result_delay_ms: u64,
    /// Dataset TOML to play instead of the built-in mountains.
    #[serde(default)]
    pub dataset: Option<PathBuf>,
    /// Fixed shuffle seed. Unset means a fresh board every time.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_history_dir() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("peakmatch"),
        Err(_) => PathBuf::from("./peakmatch-history"),
    }
}
fn default_mismatch_delay() -> u64 {
    400
}
fn default_result_delay() -> u64 {
    500
}

impl Default for PeakmatchConfig {
    fn default() -> Self {
        Self {
            history_dir: default_history_dir(),
            mismatch_delay_ms: default_mismatch_delay(),
            result_delay_ms: default_result_delay(),
            dataset: None,
            seed: None,
        }
    }
}

impl PeakmatchConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            mismatch_delay: Duration::from_millis(self.mismatch_delay_ms),
        }
    }

    pub fn result_delay(&self) -> Duration {
        Duration::from_millis(self.result_delay_ms)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the well-known paths:
/// 1. `peakmatch.toml` in the current directory
/// 2. `~/.config/peakmatch/config.toml`
///
/// Environment variable override: `PEAKMATCH_HISTORY_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<PeakmatchConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("peakmatch.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PeakmatchConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PeakmatchConfig::default(),
    };

    if let Ok(dir) = std::env::var("PEAKMATCH_HISTORY_DIR") {
        if !dir.is_empty() {
            config.history_dir = PathBuf::from(dir);
        }
    }

    config.history_dir = resolve_path(&config.history_dir);
    config.dataset = config.dataset.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("peakmatch"))
}
