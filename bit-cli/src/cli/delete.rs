//! # Delete Command
//!
//! Offers the removable worktrees as a checklist and deletes the chosen ones
//! together with the branches they have checked out.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::consts::PROTECTED_BRANCHES;
use crate::errors::BitError;
use crate::git::{Git, WorktreeRecord};
use crate::output::{format_path, print_info, print_success, print_warning};
use crate::process::{ProcessRunner, SystemRunner};
use crate::prompts::{Checklist, Selector};

const DELETE_PROMPT: &str = "Delete which worktrees?";

/// What happened to the branch of a removed worktree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchCleanup {
  /// `git branch --delete --force <name>` succeeded
  Deleted { name: String },
  /// The worktree had no branch checked out, so none was deleted
  Detached,
  /// git refused; `reason` holds its message
  Failed { name: String, reason: String },
}

/// Result of cleaning up one selected worktree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
  pub path: PathBuf,
  /// `git worktree remove`; the error holds git's message
  pub worktree: Result<(), String>,
  pub branch: BranchCleanup,
}

impl DeleteOutcome {
  pub fn is_success(&self) -> bool {
    self.worktree.is_ok() && !matches!(self.branch, BranchCleanup::Failed { .. })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteReport {
  /// The checklist was confirmed with nothing ticked
  NothingSelected,
  /// One outcome per selected worktree, in checklist order
  Deleted(Vec<DeleteOutcome>),
}

pub(crate) fn handle_delete_command() -> Result<()> {
  let config = Config::load()?;
  let git = Git::new(SystemRunner);

  match delete_worktrees(&git, &Checklist, &config.protected_branches)? {
    DeleteReport::NothingSelected => print_info("No worktrees selected"),
    DeleteReport::Deleted(outcomes) => print_summary(&outcomes),
  }

  Ok(())
}

fn file_name(path: &Path) -> Option<&str> {
  path.file_name().and_then(|n| n.to_str())
}

/// Filter `worktrees` down to the ones that may be deleted.
///
/// The first record is git's primary worktree and is always kept. Beyond that,
/// a worktree is kept when its directory is named `main`, `master`,
/// `top_level_name` or one of `extra_protected`, or when it has `main`,
/// `master` or one of `extra_protected` checked out.
pub fn deletion_candidates(
  worktrees: &[WorktreeRecord],
  top_level_name: &str,
  extra_protected: &[String],
) -> Vec<WorktreeRecord> {
  let is_protected_name = |name: &str| PROTECTED_BRANCHES.contains(&name) || extra_protected.iter().any(|p| p == name);

  let is_protected = |record: &WorktreeRecord| {
    let dir_protected = match file_name(&record.path) {
      Some(name) => name == top_level_name || is_protected_name(name),
      None => true,
    };
    dir_protected || record.branch.as_deref().is_some_and(is_protected_name)
  };

  worktrees
    .iter()
    .skip(1)
    .filter(|record| !is_protected(*record))
    .cloned()
    .collect()
}

/// List, filter, prompt and delete.
///
/// Fails before prompting when not inside a repository or when nothing is
/// left to offer. Per-worktree git failures do not stop the batch; they are
/// recorded in the returned outcomes.
pub fn delete_worktrees<R: ProcessRunner, S: Selector>(
  git: &Git<R>,
  selector: &S,
  extra_protected: &[String],
) -> Result<DeleteReport> {
  if !git.is_inside_repo() {
    return Err(BitError::NotInRepository.into());
  }

  let worktrees = git.list_worktree_records()?;
  let top_level = git.top_level()?;
  let top_level_name = file_name(&top_level).unwrap_or_default();

  let candidates = deletion_candidates(&worktrees, top_level_name, extra_protected);
  debug!("{} of {} worktrees can be deleted", candidates.len(), worktrees.len());
  if candidates.is_empty() {
    return Err(BitError::NoWorktreesToDelete.into());
  }

  let labels: Vec<String> = candidates.iter().map(|r| r.path.display().to_string()).collect();
  let picks = selector.select(DELETE_PROMPT, &labels)?;
  if picks.is_empty() {
    return Ok(DeleteReport::NothingSelected);
  }

  let outcomes = picks
    .into_iter()
    .filter_map(|i| candidates.get(i))
    .map(|record| delete_one(git, record))
    .collect();

  Ok(DeleteReport::Deleted(outcomes))
}

fn delete_one<R: ProcessRunner>(git: &Git<R>, record: &WorktreeRecord) -> DeleteOutcome {
  let path = &record.path;
  let worktree = git.remove_worktree(path).map_err(|e| e.to_string());
  if let Err(e) = &worktree {
    warn!("Failed to remove worktree {}: {e}", path.display());
  }

  let branch = match &record.branch {
    Some(name) => match git.delete_branch(name) {
      Ok(()) => BranchCleanup::Deleted { name: name.clone() },
      Err(e) => {
        warn!("Failed to delete branch {name} of {}: {e}", path.display());
        BranchCleanup::Failed {
          name: name.clone(),
          reason: e.to_string(),
        }
      }
    },
    None => {
      info!("{} is detached; no branch to delete", path.display());
      BranchCleanup::Detached
    }
  };

  DeleteOutcome {
    path: path.clone(),
    worktree,
    branch,
  }
}

fn print_summary(outcomes: &[DeleteOutcome]) {
  for outcome in outcomes {
    let path = format_path(&outcome.path.display().to_string());
    if let Err(e) = &outcome.worktree {
      print_warning(&format!("Could not remove worktree {path}: {e}"));
    }
    match &outcome.branch {
      BranchCleanup::Failed { name, reason } => {
        print_warning(&format!("Could not delete branch {name} of {path}: {reason}"));
      }
      BranchCleanup::Deleted { name } if outcome.worktree.is_ok() => {
        print_success(&format!("Deleted {path} and branch {name}"));
      }
      BranchCleanup::Detached if outcome.worktree.is_ok() => {
        print_success(&format!("Deleted {path} (detached, no branch removed)"));
      }
      _ => {}
    }
  }

  let deleted = outcomes.iter().filter(|o| o.is_success()).count();
  if deleted < outcomes.len() {
    print_info(&format!(
      "Deleted {deleted} of {} worktree(s); the rest need manual cleanup",
      outcomes.len()
    ));
  }
}
