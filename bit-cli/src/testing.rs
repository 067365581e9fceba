//! Scripted stand-ins for the process runner and the checklist prompt, used by
//! the unit tests of the Git facade, the tmux helper and the handlers.

use std::cell::RefCell;
use std::io;

use crate::errors::BitError;
use crate::process::{ProcessCommand, ProcessOutput, ProcessRunner};
use crate::prompts::Selector;

enum Reply {
  Output(ProcessOutput),
  LaunchFailure,
}

struct Expectation {
  program: String,
  args: Vec<String>,
  reply: Reply,
}

/// Replies to commands from a fixed script and records every call.
///
/// Expectations match on program and exact argument vector; the first match
/// wins and may be hit any number of times. Unscripted commands exit 1.
#[derive(Default)]
pub struct ScriptedRunner {
  expectations: Vec<Expectation>,
  calls: RefCell<Vec<ProcessCommand>>,
}

impl ScriptedRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn on(mut self, program: &str, args: &[&str], output: ProcessOutput) -> Self {
    self.expectations.push(Expectation {
      program: program.to_string(),
      args: args.iter().map(|a| a.to_string()).collect(),
      reply: Reply::Output(output),
    });
    self
  }

  pub fn on_git(self, args: &[&str], output: ProcessOutput) -> Self {
    self.on(crate::consts::GIT_EXECUTABLE, args, output)
  }

  pub fn launch_fails(mut self, program: &str, args: &[&str]) -> Self {
    self.expectations.push(Expectation {
      program: program.to_string(),
      args: args.iter().map(|a| a.to_string()).collect(),
      reply: Reply::LaunchFailure,
    });
    self
  }

  pub fn calls(&self) -> Vec<ProcessCommand> {
    self.calls.borrow().clone()
  }

  /// Whether any recorded call to `program` started with `prefix`
  pub fn called_with_prefix(&self, program: &str, prefix: &[&str]) -> bool {
    self.calls.borrow().iter().any(|call| {
      call.program == program
        && call.args.len() >= prefix.len()
        && call.args.iter().zip(prefix).all(|(a, p)| a == p)
    })
  }

  /// Whether git was asked to change anything
  pub fn issued_git_mutation(&self) -> bool {
    let git = crate::consts::GIT_EXECUTABLE;
    self.called_with_prefix(git, &["worktree", "add"])
      || self.called_with_prefix(git, &["worktree", "remove"])
      || self.called_with_prefix(git, &["branch", "--delete"])
  }
}

impl ProcessRunner for ScriptedRunner {
  fn run(&self, command: &ProcessCommand) -> Result<ProcessOutput, BitError> {
    self.calls.borrow_mut().push(command.clone());

    let matched = self
      .expectations
      .iter()
      .find(|e| e.program == command.program && e.args == command.args);

    match matched.map(|e| &e.reply) {
      Some(Reply::Output(output)) => Ok(output.clone()),
      Some(Reply::LaunchFailure) => Err(BitError::Launch {
        program: command.program.clone(),
        source: io::Error::new(io::ErrorKind::NotFound, "scripted launch failure"),
      }),
      None => Ok(fail(1, &format!("unscripted command: {command}"))),
    }
  }
}

pub fn ok(stdout: &str) -> ProcessOutput {
  ProcessOutput {
    exit_code: Some(0),
    stdout: stdout.to_string(),
    stderr: String::new(),
  }
}

pub fn fail(code: i32, stderr: &str) -> ProcessOutput {
  ProcessOutput {
    exit_code: Some(code),
    stdout: String::new(),
    stderr: stderr.to_string(),
  }
}

/// Picks a fixed set of indices and remembers whether it was asked at all
pub struct ScriptedSelector {
  picks: Vec<usize>,
  shown: RefCell<Option<Vec<String>>>,
}

impl ScriptedSelector {
  pub fn picking(picks: &[usize]) -> Self {
    Self {
      picks: picks.to_vec(),
      shown: RefCell::new(None),
    }
  }

  /// The items offered by the last prompt, if one was shown
  pub fn shown(&self) -> Option<Vec<String>> {
    self.shown.borrow().clone()
  }
}

impl Selector for ScriptedSelector {
  fn select(&self, _prompt: &str, items: &[String]) -> anyhow::Result<Vec<usize>> {
    *self.shown.borrow_mut() = Some(items.to_vec());
    Ok(self.picks.clone())
  }
}
