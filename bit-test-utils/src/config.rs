//! Config files for testing
//!
//! Writes a bit config into a temporary directory so a test can point
//! `BIT_CONFIG` at it without touching the user's real configuration.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary `config.toml`, removed when the guard is dropped
pub struct ConfigFileGuard {
  temp_dir: TempDir,
  path: PathBuf,
}

impl ConfigFileGuard {
  /// Environment variable bit reads the config location from
  pub const ENV_BIT_CONFIG: &'static str = "BIT_CONFIG";

  /// Write `content` as the config file
  pub fn new(content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config file");
    Self { temp_dir, path }
  }

  /// A config location that does not exist, so bit falls back to defaults
  pub fn absent() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("config.toml");
    Self { temp_dir, path }
  }

  /// Path to hand to `BIT_CONFIG`
  pub fn path(&self) -> &Path {
    &self.path
  }
}
