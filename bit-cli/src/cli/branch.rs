//! # Branch Command
//!
//! Creates a worktree next to the current repository and opens a tmux window
//! in it.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::errors::BitError;
use crate::git::{Git, validate_worktree_name};
use crate::output::{format_path, format_window_name, print_success, print_warning};
use crate::process::{ProcessRunner, SystemRunner};
use crate::tmux::{WindowOutcome, open_window, session_from_env};

/// Arguments for `bit branch`
#[derive(Args)]
pub struct BranchArgs {
  /// Name of new branch
  #[arg(short = 'n', long, required = true, value_parser = parse_worktree_name)]
  pub name: String,
}

fn parse_worktree_name(name: &str) -> Result<String, BitError> {
  validate_worktree_name(name)?;
  Ok(name.to_string())
}

pub(crate) fn handle_branch_command(args: BranchArgs) -> Result<()> {
  let config = Config::load()?;
  let git = Git::new(SystemRunner);
  let worktree = create_branch_worktree(&git, &args.name)?;

  print_success(&format!(
    "Created worktree '{}' at {}",
    args.name,
    format_path(&worktree.display().to_string())
  ));

  let session = session_from_env();
  report_window(
    &worktree,
    open_window(&git, &worktree, session.as_deref(), config.tmux.enabled),
  );

  Ok(())
}

/// Create the worktree for branch `name` beside the repository's top level
pub fn create_branch_worktree<R: ProcessRunner>(git: &Git<R>, name: &str) -> Result<PathBuf> {
  if !git.is_inside_repo() {
    return Err(BitError::NotInRepository.into());
  }

  let top_level = git.top_level()?;
  Ok(git.add_worktree(&top_level, name)?)
}

fn report_window(worktree: &Path, outcome: WindowOutcome) {
  match outcome {
    WindowOutcome::Opened { name, .. } => {
      print_success(&format!("Opened tmux window {}", format_window_name(&name)));
    }
    WindowOutcome::NotInSession => {
      print_warning(&format!(
        "Not in a tmux session: {}",
        format_path(&worktree.display().to_string())
      ));
    }
    WindowOutcome::Disabled => {}
    WindowOutcome::Failed { reason } => {
      print_warning(&format!("Could not open a tmux window: {reason}"));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{ScriptedRunner, fail, ok};

  #[test]
  fn outside_repo_fails_without_mutation() {
    let runner = ScriptedRunner::new().on_git(
      &["rev-parse", "--show-toplevel"],
      fail(128, "fatal: not a git repository (or any of the parent directories): .git"),
    );

    let err = create_branch_worktree(&Git::new(&runner), "foo").unwrap_err();

    assert!(matches!(err.downcast_ref::<BitError>(), Some(BitError::NotInRepository)));
    assert_eq!(err.to_string(), "Not in a Git repository");
    assert!(!runner.issued_git_mutation());
  }

  #[test]
  fn creates_sibling_worktree() {
    let runner = ScriptedRunner::new()
      .on_git(&["rev-parse", "--show-toplevel"], ok("/home/u/proj\n"))
      .on_git(&["worktree", "add", "/home/u/foo"], ok("Preparing worktree (new branch 'foo')\n"));

    let path = create_branch_worktree(&Git::new(&runner), "foo").unwrap();

    assert_eq!(path, PathBuf::from("/home/u/foo"));
    assert!(runner.called_with_prefix(crate::consts::GIT_EXECUTABLE, &["worktree", "add", "/home/u/foo"]));
  }

  #[test]
  fn add_failure_is_surfaced() {
    let runner = ScriptedRunner::new()
      .on_git(&["rev-parse", "--show-toplevel"], ok("/home/u/proj\n"))
      .on_git(
        &["worktree", "add", "/home/u/foo"],
        fail(128, "fatal: a branch named 'foo' already exists\n"),
      );

    let err = create_branch_worktree(&Git::new(&runner), "foo").unwrap_err();

    assert!(err.to_string().contains("a branch named 'foo' already exists"));
  }

  #[test]
  fn escaping_names_never_reach_git() {
    let runner = ScriptedRunner::new().on_git(&["rev-parse", "--show-toplevel"], ok("/home/u/proj\n"));

    for name in ["/tmp/elsewhere", "../escape"] {
      let err = create_branch_worktree(&Git::new(&runner), name).unwrap_err();
      assert!(matches!(
        err.downcast_ref::<BitError>(),
        Some(BitError::InvalidWorktreeName { .. })
      ));
    }
    assert!(!runner.issued_git_mutation());
  }

  #[test]
  fn name_parser_rejects_paths_outside_the_parent() {
    assert_eq!(parse_worktree_name("feat-a").unwrap(), "feat-a");
    assert!(parse_worktree_name("/tmp/elsewhere").is_err());
    assert!(parse_worktree_name("../escape").is_err());
    assert!(parse_worktree_name("").is_err());
  }
}
