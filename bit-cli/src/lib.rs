//! # bit
//!
//! Git worktree management and tmux window creation behind a handful of short
//! subcommands. All repository state is read and changed through the `git`
//! executable; tmux is driven through its own CLI.

pub mod cli;
pub mod config;
pub mod consts;
pub mod errors;
pub mod git;
pub mod output;
pub mod process;
pub mod prompts;
pub mod tmux;

#[cfg(test)]
mod testing;
