//! # Pull Command
//!
//! Placeholder for pulling a branch from origin into a worktree. The flag is
//! parsed so scripts can start using it, but nothing happens yet.

use anyhow::Result;
use clap::Args;
use tracing::debug;

/// Arguments for `bit pull`
#[derive(Args)]
pub struct PullArgs {
  /// Name of branch to pull
  #[arg(short = 'n', long)]
  pub name: Option<String>,
}

pub(crate) fn handle_pull_command(args: PullArgs) -> Result<()> {
  debug!(name = ?args.name, "pull is not implemented, nothing to do");
  Ok(())
}
