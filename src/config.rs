use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from `~/.qton/config.toml` (or `--config FILE`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Shots used when neither the script nor the command line sets them.
    pub shots: usize,
    /// Seed for reproducible sampling; unset means a fresh thread RNG.
    pub seed: Option<u64>,
    /// Digits printed after the decimal point for amplitudes.
    pub precision: usize,
    /// Colour the histogram output.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { shots: 1024, seed: None, precision: 6, color: true }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~\Users\you\.qton\config.toml on Windows; ~/.qton/config.toml elsewhere
    dirs_next::home_dir().map(|h| h.join(".qton").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

/// Load the config at `path`; a missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("Read config {}", path.display()))?;
    toml::from_str(&src).with_context(|| format!("Parse config {}", path.display()))
}
