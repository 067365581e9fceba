//! # Clone Command
//!
//! Placeholder for cloning a repository into a worktree layout. Accepts
//! `--git` and does nothing yet.

use anyhow::Result;
use clap::Args;
use tracing::debug;

/// Arguments for `bit clone`
#[derive(Args)]
pub struct CloneArgs {
  /// URL of Git repo
  #[arg(short = 'g', long, value_name = "URL")]
  pub git: Option<String>,
}

pub(crate) fn handle_clone_command(args: CloneArgs) -> Result<()> {
  debug!(url = ?args.git, "clone is not implemented, nothing to do");
  Ok(())
}
