//! # Process Runner
//!
//! Spawns external programs with an explicit argument vector and captures
//! their exit code and output. A non-zero exit is an ordinary result; only a
//! failure to start the program is an error.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, trace};

use crate::errors::BitError;

/// A program invocation: executable, arguments and optional working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
  pub program: String,
  pub args: Vec<String>,
  pub working_dir: Option<PathBuf>,
}

impl ProcessCommand {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      working_dir: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Path arguments are passed through lossily; bit only hands paths it got
  /// back from git itself.
  pub fn path_arg(self, path: &Path) -> Self {
    self.arg(path.to_string_lossy())
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.working_dir = Some(dir.into());
    self
  }
}

impl fmt::Display for ProcessCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {arg}")?;
    }
    Ok(())
  }
}

/// Captured result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
  /// `None` when the process was terminated by a signal
  pub exit_code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl ProcessOutput {
  /// Whether the process exited with status code 0
  pub fn success(&self) -> bool {
    self.exit_code == Some(0)
  }
}

/// Something that can run a [`ProcessCommand`] to completion
pub trait ProcessRunner {
  fn run(&self, command: &ProcessCommand) -> Result<ProcessOutput, BitError>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
  fn run(&self, command: &ProcessCommand) -> Result<ProcessOutput, BitError> {
    (**self).run(command)
  }
}

/// Runs commands as real child processes, blocking until they exit
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
  fn run(&self, command: &ProcessCommand) -> Result<ProcessOutput, BitError> {
    debug!(cwd = ?command.working_dir, "Running {command}");

    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args);
    if let Some(dir) = &command.working_dir {
      cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|source| BitError::Launch {
      program: command.program.clone(),
      source,
    })?;

    let result = ProcessOutput {
      exit_code: output.status.code(),
      stdout: String::from_utf8_lossy(&output.stdout).to_string(),
      stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    };
    trace!(exit_code = ?result.exit_code, "{} finished", command.program);

    Ok(result)
  }
}
