//! # Configuration
//!
//! Optional TOML settings. The file is looked up at `$BIT_CONFIG` or, failing
//! that, `config.toml` in the platform config directory. A missing file means
//! defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::consts::{CONFIG_FILE_NAME, ENV_BIT_CONFIG};
use crate::errors::BitError;

/// User settings for bit
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Names never offered by `bit delete`, matched against a worktree's
  /// directory and its checked-out branch, in addition to `main` and `master`
  pub protected_branches: Vec<String>,
  pub tmux: TmuxConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TmuxConfig {
  /// Open a tmux window after `bit branch`
  pub enabled: bool,
}

impl Default for TmuxConfig {
  fn default() -> Self {
    Self { enabled: true }
  }
}

impl Config {
  /// Where the config file is expected to live
  pub fn default_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(ENV_BIT_CONFIG).filter(|p| !p.is_empty()) {
      return Some(PathBuf::from(path));
    }
    ProjectDirs::from("", "", "bit").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
  }

  /// Load the config from its default location
  pub fn load() -> Result<Self, BitError> {
    match Self::default_path() {
      Some(path) => Self::load_from(&path),
      None => {
        debug!("No config directory available, using defaults");
        Ok(Self::default())
      }
    }
  }

  /// Load the config at `path`, or defaults when the file does not exist
  pub fn load_from(path: &Path) -> Result<Self, BitError> {
    if !path.exists() {
      debug!("No config file at {}", path.display());
      return Ok(Self::default());
    }

    let content = fs::read_to_string(path).map_err(|e| BitError::Config {
      path: path.to_path_buf(),
      message: e.to_string(),
    })?;
    let config = Self::parse(&content).map_err(|e| BitError::Config {
      path: path.to_path_buf(),
      message: e.message().to_string(),
    })?;

    debug!("Loaded config from {}", path.display());
    Ok(config)
  }

  fn parse(content: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(content)
  }
}
