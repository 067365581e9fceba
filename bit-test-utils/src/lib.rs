//! Test utilities shared across the bit workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary Git repositories with room for sibling worktrees
//!   ([`GitRepoTestGuard`])
//! - Throwaway config files for the `BIT_CONFIG` override ([`ConfigFileGuard`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod git;

// Re-export commonly used items
pub use config::ConfigFileGuard;
pub use git::{GitRepoTestGuard, create_commit};
