//! Constants for the bit CLI
//!
//! Executable names, environment variables and default values shared across
//! the command handlers.

/// Environment variable set by tmux inside every session
pub const ENV_TMUX: &str = "TMUX";

/// Environment variable pointing at an explicit config file
pub const ENV_BIT_CONFIG: &str = "BIT_CONFIG";

/// Worktree directory names that `bit delete` never offers for removal
pub const PROTECTED_BRANCHES: [&str; 2] = ["main", "master"];

/// Name of the config file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Platform-specific Git executable name
#[cfg(windows)]
pub const GIT_EXECUTABLE: &str = "git.exe";

/// Platform-specific Git executable name
#[cfg(not(windows))]
pub const GIT_EXECUTABLE: &str = "git";

/// tmux executable name
pub const TMUX_EXECUTABLE: &str = "tmux";
