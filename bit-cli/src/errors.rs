//! # Errors
//!
//! Failure modes surfaced by the process runner, the Git facade and the
//! command handlers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while driving `git` and `tmux`
#[derive(Debug, Error)]
pub enum BitError {
  /// The current directory is not inside a Git working copy
  #[error("Not in a Git repository")]
  NotInRepository,

  /// A git invocation exited with a non-zero status
  #[error("`{command}` failed: {stderr}")]
  GitCommandFailed { command: String, stderr: String },

  /// Every worktree was filtered out as protected
  #[error("No worktrees available to delete")]
  NoWorktreesToDelete,

  /// An external program could not be started at all
  #[error("Failed to launch `{program}`")]
  Launch {
    program: String,
    #[source]
    source: io::Error,
  },

  /// A worktree name that would resolve outside the repository's parent
  /// directory
  #[error("Invalid worktree name '{name}': {reason}")]
  InvalidWorktreeName { name: String, reason: String },

  /// The config file exists but cannot be used
  #[error("Invalid config file {}: {message}", .path.display())]
  Config { path: PathBuf, message: String },
}

impl BitError {
  /// Build a [`BitError::GitCommandFailed`] from the argument vector and the
  /// captured stderr.
  pub fn git_failed(args: &[&str], stderr: &str) -> Self {
    let stderr = stderr.trim();
    Self::GitCommandFailed {
      command: format!("git {}", args.join(" ")),
      stderr: if stderr.is_empty() {
        "no error output".to_string()
      } else {
        stderr.to_string()
      },
    }
  }
}
