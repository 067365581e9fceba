//! # Git Facade
//!
//! Semantic Git operations built on top of a [`ProcessRunner`]. Every piece of
//! repository state is read by invoking the `git` executable and interpreting
//! its exit code and text output.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::consts::GIT_EXECUTABLE;
use crate::errors::BitError;
use crate::process::{ProcessCommand, ProcessOutput, ProcessRunner};

/// Matches one `worktree <path>` record header in porcelain output
static WORKTREE_LINE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^worktree\s+(.*)$").expect("Failed to compile worktree porcelain regex"));

/// Matches the `branch <ref>` line of a porcelain record
static BRANCH_LINE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^branch\s+(.*)$").expect("Failed to compile branch porcelain regex"));

/// One record of `git worktree list --porcelain`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeRecord {
  pub path: PathBuf,
  /// Checked-out branch with `refs/heads/` stripped; `None` when detached or
  /// bare
  pub branch: Option<String>,
}

/// Split porcelain output into records, in output order.
///
/// A record starts at each `worktree` line and picks up the `branch` line that
/// follows it. Every other line (`HEAD`, `bare`, `detached`, `locked`,
/// `prunable`, blank separators and anything git adds later) is ignored.
pub fn parse_worktree_records(output: &str) -> Vec<WorktreeRecord> {
  let mut records: Vec<WorktreeRecord> = Vec::new();

  for line in output.lines() {
    if let Some(path) = WORKTREE_LINE.captures(line).and_then(|c| c.get(1)) {
      if !path.as_str().is_empty() {
        records.push(WorktreeRecord {
          path: PathBuf::from(path.as_str()),
          branch: None,
        });
      }
      continue;
    }

    if let (Some(record), Some(reference)) = (
      records.last_mut(),
      BRANCH_LINE.captures(line).and_then(|c| c.get(1)),
    ) {
      let reference = reference.as_str();
      let name = reference.strip_prefix("refs/heads/").unwrap_or(reference);
      if !name.is_empty() {
        record.branch = Some(name.to_string());
      }
    }
  }

  records
}

/// Extract the worktree paths from `git worktree list --porcelain` output.
///
/// Paths come back in output order; see [`parse_worktree_records`] for what
/// is ignored.
pub fn parse_worktree_porcelain(output: &str) -> Vec<PathBuf> {
  parse_worktree_records(output).into_iter().map(|r| r.path).collect()
}

/// Check that `name` stays inside the directory it is joined onto.
///
/// Absolute paths, drive prefixes, `.` and `..` components are rejected, so
/// `parent.join(name)` can never land outside `parent`.
pub fn validate_worktree_name(name: &str) -> Result<(), BitError> {
  let invalid = |reason: &str| BitError::InvalidWorktreeName {
    name: name.to_string(),
    reason: reason.to_string(),
  };

  if name.trim().is_empty() {
    return Err(invalid("it is empty"));
  }
  for component in Path::new(name).components() {
    match component {
      Component::Normal(_) => {}
      Component::RootDir | Component::Prefix(_) => return Err(invalid("it must be relative")),
      Component::ParentDir | Component::CurDir => return Err(invalid("it must not contain `.` or `..`")),
    }
  }
  Ok(())
}

/// Derive a repository name from a remote URL.
///
/// Takes the last segment after a `/` or `:` and strips its extension, so
/// `https://github.com/owner/repo.git`, `git@github.com:owner/repo.git` and
/// `/srv/git/repo` all yield `repo`.
pub fn repo_name_from_url(url: &str) -> Option<String> {
  let last = url.trim().trim_end_matches('/').rsplit(['/', ':']).next()?;
  let stem = Path::new(last).file_stem()?.to_str()?;
  if stem.is_empty() { None } else { Some(stem.to_string()) }
}

/// Git operations executed through an external `git` binary
pub struct Git<R> {
  runner: R,
  working_dir: Option<PathBuf>,
}

impl<R: ProcessRunner> Git<R> {
  /// Run git in the process's current directory
  pub fn new(runner: R) -> Self {
    Self {
      runner,
      working_dir: None,
    }
  }

  /// Run git as if started in `dir`
  pub fn in_dir(runner: R, dir: impl Into<PathBuf>) -> Self {
    Self {
      runner,
      working_dir: Some(dir.into()),
    }
  }

  /// The runner used for git, shared with other helpers that need one
  pub fn runner(&self) -> &R {
    &self.runner
  }

  fn command(&self, args: &[&str]) -> ProcessCommand {
    let command = ProcessCommand::new(GIT_EXECUTABLE).args(args.iter().copied());
    match &self.working_dir {
      Some(dir) => command.current_dir(dir),
      None => command,
    }
  }

  /// Run a command and turn a non-zero exit into [`BitError::GitCommandFailed`]
  fn run_checked(&self, command: ProcessCommand) -> Result<ProcessOutput, BitError> {
    let output = self.runner.run(&command)?;
    if output.success() {
      Ok(output)
    } else {
      let args: Vec<&str> = command.args.iter().map(String::as_str).collect();
      Err(BitError::git_failed(&args, &output.stderr))
    }
  }

  /// Whether the current directory is inside a Git working copy
  pub fn is_inside_repo(&self) -> bool {
    match self.runner.run(&self.command(&["rev-parse", "--show-toplevel"])) {
      Ok(output) => output.success(),
      Err(err) => {
        warn!("Could not run git: {err}");
        false
      }
    }
  }

  /// Top-level directory of the enclosing repository.
  ///
  /// Callers are expected to have checked [`Git::is_inside_repo`] first.
  pub fn top_level(&self) -> Result<PathBuf, BitError> {
    let output = self.run_checked(self.command(&["rev-parse", "--show-toplevel"]))?;
    Ok(PathBuf::from(output.stdout.trim()))
  }

  /// Repository name taken from the `origin` remote as seen from
  /// `worktree_path`, or `None` when there is no usable remote.
  pub fn repo_name(&self, worktree_path: &Path) -> Option<String> {
    let command = self
      .command(&["config", "--get", "remote.origin.url"])
      .current_dir(worktree_path);
    match self.runner.run(&command) {
      Ok(output) if output.success() => repo_name_from_url(&output.stdout),
      Ok(_) => {
        debug!("No origin remote configured for {}", worktree_path.display());
        None
      }
      Err(err) => {
        debug!("Could not read origin remote: {err}");
        None
      }
    }
  }

  /// Create a worktree named `name` next to `top_level` (a sibling, never a
  /// child) and return its path.
  pub fn add_worktree(&self, top_level: &Path, name: &str) -> Result<PathBuf, BitError> {
    validate_worktree_name(name)?;

    let parent = top_level.parent().unwrap_or(top_level);
    let target = parent.join(name);

    debug!("Adding worktree at {}", target.display());
    let command = self
      .command(&["worktree", "add"])
      .path_arg(&target)
      .current_dir(top_level);
    self.run_checked(command)?;

    Ok(target)
  }

  /// All worktrees of the current repository with their branches, in the
  /// order git reports them
  pub fn list_worktree_records(&self) -> Result<Vec<WorktreeRecord>, BitError> {
    let output = self.run_checked(self.command(&["worktree", "list", "--porcelain"]))?;
    Ok(parse_worktree_records(&output.stdout))
  }

  /// All worktree paths of the current repository, in the order git reports
  /// them
  pub fn list_worktrees(&self) -> Result<Vec<PathBuf>, BitError> {
    Ok(self.list_worktree_records()?.into_iter().map(|r| r.path).collect())
  }

  /// Force-remove the worktree at `path`
  pub fn remove_worktree(&self, path: &Path) -> Result<(), BitError> {
    let command = self.command(&["worktree", "remove", "--force"]).path_arg(path);
    self.run_checked(command).map(|_| ())
  }

  /// Force-delete the local branch `name`
  pub fn delete_branch(&self, name: &str) -> Result<(), BitError> {
    self
      .run_checked(self.command(&["branch", "--delete", "--force", name]))
      .map(|_| ())
  }
}
