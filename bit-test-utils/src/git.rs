//! Git repository management for testing
//!
//! This module provides utilities for creating temporary git repositories.
//! bit places new worktrees next to the repository, so every repository lives
//! one level down inside its temporary directory and siblings are cleaned up
//! along with it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::{Repository, Signature};
use tempfile::TempDir;

/// A test guard that owns a temporary directory holding one git repository at
/// `<temp>/<name>`. Everything under the temporary directory is removed when
/// the guard is dropped.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the repository and its siblings
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
  repo_path: PathBuf,
}

impl GitRepoTestGuard {
  /// Directory name used by [`GitRepoTestGuard::new`]
  pub const DEFAULT_NAME: &'static str = "proj";

  /// Create a repository named `proj` with one commit on its default branch
  pub fn new() -> Self {
    Self::named(Self::DEFAULT_NAME)
  }

  /// Create a repository in a directory called `name` with one commit
  pub fn named(name: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let repo_path = temp_dir.path().join(name);
    fs::create_dir_all(&repo_path).expect("Failed to create repository directory");

    let repo = Repository::init(&repo_path).expect("Failed to initialize git repository");

    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Bit Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "bit-test@example.com")
      .expect("Failed to set user.email");

    create_commit(&repo, "README.md", "hello", "initial commit").expect("Failed to create initial commit");

    Self {
      temp_dir,
      repo,
      repo_path,
    }
  }

  /// Path of the repository's working directory
  pub fn path(&self) -> &Path {
    &self.repo_path
  }

  /// The directory holding the repository; new worktrees appear here
  pub fn parent(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Path a sibling worktree called `name` would get
  pub fn sibling(&self, name: &str) -> PathBuf {
    self.temp_dir.path().join(name)
  }

  /// Register an `origin` remote pointing at `url`
  pub fn add_origin(&self, url: &str) -> Result<()> {
    self.repo.remote("origin", url).context("Failed to add origin remote")?;
    Ok(())
  }

  /// Names of the linked worktrees git knows about
  pub fn worktree_names(&self) -> Result<Vec<String>> {
    let names = self.repo.worktrees()?;
    Ok(names.iter().flatten().map(str::to_string).collect())
  }

  /// Whether a local branch called `name` exists
  pub fn has_branch(&self, name: &str) -> bool {
    self.repo.find_branch(name, git2::BranchType::Local).is_ok()
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

/// Helper function to create a commit in a repository
pub fn create_commit(repo: &Repository, file_name: &str, content: &str, message: &str) -> Result<()> {
  let repo_path = repo.workdir().context("Repository has no working directory")?;
  fs::write(repo_path.join(file_name), content)?;

  let mut index = repo.index()?;
  index.add_path(Path::new(file_name))?;
  index.write()?;

  let tree_id = index.write_tree()?;
  let tree = repo.find_tree(tree_id)?;

  let signature = Signature::now("Bit Test User", "bit-test@example.com")?;

  let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
  let parents: Vec<&git2::Commit> = parent.iter().collect();
  repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

  Ok(())
}
