//! # tmux Windows
//!
//! Opens a tmux window rooted at a freshly created worktree when bit runs
//! inside a tmux session.

use std::env;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::consts::{ENV_TMUX, TMUX_EXECUTABLE};
use crate::git::Git;
use crate::process::{ProcessCommand, ProcessRunner};

/// What happened when asked to open a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowOutcome {
  /// tmux created the window; `target` is what `new-window -P` printed
  Opened { name: String, target: String },
  /// No tmux session in the environment
  NotInSession,
  /// Window creation turned off in the config
  Disabled,
  /// tmux could not be run or refused the request
  Failed { reason: String },
}

/// The current tmux session sentinel, if bit runs inside tmux
pub fn session_from_env() -> Option<String> {
  env::var(ENV_TMUX).ok().filter(|v| !v.is_empty())
}

/// Name for the window of `worktree`: `<repo> (<worktree dir>)`.
///
/// `<repo>` is the name of the origin remote when there is one, otherwise the
/// name of the directory holding the worktree.
pub fn window_name<R: ProcessRunner>(git: &Git<R>, worktree: &Path) -> String {
  let dir = worktree
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or_else(|| worktree.display().to_string());

  let repo = git.repo_name(worktree).or_else(|| {
    worktree
      .parent()
      .and_then(Path::file_name)
      .map(|n| n.to_string_lossy().to_string())
  });

  match repo {
    Some(repo) => format!("{repo} ({dir})"),
    None => dir,
  }
}

/// Open a tmux window for `worktree`.
///
/// `session` is the value of the tmux sentinel (see [`session_from_env`]).
/// Nothing is run when `enabled` is false, which wins over a missing session,
/// or when it is absent.
pub fn open_window<R: ProcessRunner>(
  git: &Git<R>,
  worktree: &Path,
  session: Option<&str>,
  enabled: bool,
) -> WindowOutcome {
  if !enabled {
    info!("tmux windows are disabled in the config");
    return WindowOutcome::Disabled;
  }
  if session.is_none() {
    return WindowOutcome::NotInSession;
  }

  let name = window_name(git, worktree);
  let command = ProcessCommand::new(TMUX_EXECUTABLE)
    .args(["new-window", "-n", name.as_str(), "-c"])
    .path_arg(worktree)
    .arg("-P");

  match git.runner().run(&command) {
    Ok(output) if output.success() => {
      let target = output.stdout.trim().to_string();
      debug!("Opened tmux window {target}");
      WindowOutcome::Opened { name, target }
    }
    Ok(output) => {
      warn!("tmux new-window exited with {:?}", output.exit_code);
      WindowOutcome::Failed {
        reason: output.stderr.trim().to_string(),
      }
    }
    Err(err) => {
      warn!("Could not run tmux: {err}");
      WindowOutcome::Failed {
        reason: err.to_string(),
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use bit_test_utils::GitRepoTestGuard;

  use super::*;
  use crate::process::SystemRunner;
  use crate::testing::{ScriptedRunner, fail, ok};

  const REMOTE: [&str; 3] = ["config", "--get", "remote.origin.url"];

  #[test]
  fn no_session_runs_nothing() {
    let runner = ScriptedRunner::new();
    let outcome = open_window(&Git::new(&runner), Path::new("/home/u/foo"), None, true);
    assert_eq!(outcome, WindowOutcome::NotInSession);
    assert!(runner.calls().is_empty());
  }

  #[test]
  fn disabled_runs_nothing() {
    let runner = ScriptedRunner::new();
    let outcome = open_window(&Git::new(&runner), Path::new("/home/u/foo"), Some("/tmp/tmux-1000/default"), false);
    assert_eq!(outcome, WindowOutcome::Disabled);
    assert!(runner.calls().is_empty());
  }

  #[test]
  fn disabled_wins_over_missing_session() {
    let runner = ScriptedRunner::new();
    let outcome = open_window(&Git::new(&runner), Path::new("/home/u/foo"), None, false);
    assert_eq!(outcome, WindowOutcome::Disabled);
    assert!(runner.calls().is_empty());
  }

  #[test]
  fn window_named_after_real_origin_remote() {
    let guard = GitRepoTestGuard::new();
    guard.add_origin("git@github.com:owner/widget.git").unwrap();

    assert_eq!(window_name(&Git::new(SystemRunner), guard.path()), "widget (proj)");
  }

  #[test]
  fn window_name_without_real_remote_uses_parent_directory() {
    let guard = GitRepoTestGuard::new();
    let parent = guard.parent().file_name().unwrap().to_string_lossy().to_string();

    assert_eq!(
      window_name(&Git::new(SystemRunner), guard.path()),
      format!("{parent} (proj)")
    );
  }

  #[test]
  fn window_named_after_remote() {
    let runner = ScriptedRunner::new()
      .on_git(&REMOTE, ok("https://github.com/owner/bit.git\n"))
      .on(
        TMUX_EXECUTABLE,
        &["new-window", "-n", "bit (foo)", "-c", "/home/u/foo", "-P"],
        ok("work:3.0\n"),
      );

    let outcome = open_window(&Git::new(&runner), Path::new("/home/u/foo"), Some("/tmp/tmux"), true);

    assert_eq!(
      outcome,
      WindowOutcome::Opened {
        name: "bit (foo)".to_string(),
        target: "work:3.0".to_string(),
      }
    );
  }

  #[test]
  fn window_name_falls_back_to_parent_directory() {
    let runner = ScriptedRunner::new().on_git(&REMOTE, fail(1, ""));
    assert_eq!(window_name(&Git::new(&runner), Path::new("/home/u/foo")), "u (foo)");
  }

  #[test]
  fn tmux_failure_is_reported_not_raised() {
    let runner = ScriptedRunner::new()
      .on_git(&REMOTE, fail(1, ""))
      .on(
        TMUX_EXECUTABLE,
        &["new-window", "-n", "u (foo)", "-c", "/home/u/foo", "-P"],
        fail(1, "no server running\n"),
      );

    let outcome = open_window(&Git::new(&runner), Path::new("/home/u/foo"), Some("/tmp/tmux"), true);

    assert_eq!(
      outcome,
      WindowOutcome::Failed {
        reason: "no server running".to_string()
      }
    );
  }

  #[test]
  fn missing_tmux_binary_is_reported() {
    let runner = ScriptedRunner::new().on_git(&REMOTE, fail(1, "")).launch_fails(
      TMUX_EXECUTABLE,
      &["new-window", "-n", "u (foo)", "-c", "/home/u/foo", "-P"],
    );
    let outcome = open_window(&Git::new(&runner), Path::new("/home/u/foo"), Some("/tmp/tmux"), true);
    assert!(matches!(outcome, WindowOutcome::Failed { .. }));
  }
}
