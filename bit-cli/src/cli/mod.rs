//! # Command Line Interface
//!
//! Defines the CLI structure for bit and dispatches each subcommand to its
//! handler.

mod branch;
mod clone;
mod delete;
mod pull;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};

pub use self::branch::{BranchArgs, create_branch_worktree};
pub use self::clone::CloneArgs;
pub use self::delete::{BranchCleanup, DeleteOutcome, DeleteReport, delete_worktrees, deletion_candidates};
pub use self::pull::PullArgs;
use crate::output::ColorMode;

/// Top-level CLI command for bit
#[derive(Parser)]
#[command(name = "bit")]
#[command(about = "Git worktrees and tmux windows in a few keystrokes")]
#[command(
  long_about = "bit wraps Git worktree management and tmux window creation into short subcommands.\n\n\
        Worktrees are created next to the current repository, and when bit runs inside\n\
        tmux each new worktree gets its own window."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    global = true,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for bit
#[derive(Subcommand)]
pub enum Commands {
  /// Create a new branch
  #[command(long_about = "Create a new worktree and branch next to the current repository.\n\n\
            The worktree is placed in a sibling directory named after the branch. When run\n\
            inside tmux, a new window is opened in the worktree.")]
  Branch(BranchArgs),

  /// Pull a branch from origin
  #[command(long_about = "Pull a branch from origin into a worktree.\n\n\
            Not implemented yet: the flag is accepted and nothing happens.")]
  Pull(PullArgs),

  /// Clone a repo into a worktree
  #[command(long_about = "Clone a repository into a worktree layout.\n\n\
            Not implemented yet: the flag is accepted and nothing happens.")]
  Clone(CloneArgs),

  /// Delete worktree(s)
  #[command(long_about = "Pick worktrees from a checklist and delete them along with their branches.\n\n\
            The primary worktree, worktrees named main, master or after the repository\n\
            itself, and worktrees with main or master checked out are never offered.")]
  Delete,
}

/// Dispatch a parsed command line to its handler
pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  match cli.command {
    Commands::Branch(args) => branch::handle_branch_command(args),
    Commands::Pull(args) => pull::handle_pull_command(args),
    Commands::Clone(args) => clone::handle_clone_command(args),
    Commands::Delete => delete::handle_delete_command(),
  }
}
