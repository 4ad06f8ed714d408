//! Drill configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Mode;
use crate::session::SessionConfig;
use crate::table::{IndexRange, MAX_INDEX, MIN_INDEX};

/// Top-level logdrill configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogdrillConfig {
    /// First table index drilled.
    #[serde(default = "default_range_min")]
    pub range_min: u32,
    /// Last table index drilled.
    #[serde(default = "default_range_max")]
    pub range_max: u32,
    /// Query order and direction.
    #[serde(default)]
    pub mode: Mode,
    /// Pause before outstanding queries are served again, in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

fn default_range_min() -> u32 {
    MIN_INDEX
}
fn default_range_max() -> u32 {
    MAX_INDEX
}
fn default_retry_delay() -> u64 {
    1500
}

impl Default for LogdrillConfig {
    fn default() -> Self {
        Self {
            range_min: default_range_min(),
            range_max: default_range_max(),
            mode: Mode::default(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

impl LogdrillConfig {
    /// Validate the range and build a session configuration.
    pub fn session_config(&self) -> Result<SessionConfig> {
        let range = IndexRange::new(self.range_min, self.range_max)
            .context("invalid drill range in configuration")?;
        Ok(SessionConfig {
            range,
            mode: self.mode,
        })
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `logdrill.toml` in the current directory
/// 2. `~/.config/logdrill/config.toml`
///
/// Environment variable overrides: `LOGDRILL_MODE`, `LOGDRILL_RETRY_DELAY_MS`.
pub fn load_config() -> Result<LogdrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LogdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("logdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LogdrillConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    Ok(config)
}

/// Parse configuration TOML.
pub fn parse_config(content: &str) -> Result<LogdrillConfig> {
    Ok(toml::from_str::<LogdrillConfig>(content)?)
}

fn apply_env_overrides(
    config: &mut LogdrillConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(mode) = lookup("LOGDRILL_MODE") {
        config.mode = mode
            .parse()
            .map_err(|e: String| anyhow::anyhow!("LOGDRILL_MODE: {e}"))?;
    }
    if let Some(delay) = lookup("LOGDRILL_RETRY_DELAY_MS") {
        config.retry_delay_ms = delay
            .trim()
            .parse()
            .with_context(|| format!("LOGDRILL_RETRY_DELAY_MS: invalid value '{delay}'"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("logdrill"))
}
