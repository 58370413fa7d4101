//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GitPulseError`] which covers every failure mode of the
//! repository state engine. It uses `thiserror` for ergonomic error definitions
//! and includes constructors for the common failure scenarios.
//!
//! # Public API
//! - [`GitPulseError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitPulseError>`
//!
//! # Error Categories
//! - **Caller bugs**: invalid path strings, commands missing required data
//! - **Git execution**: non-zero exits, recognized checkout conflicts
//! - **Infrastructure**: process spawning, filesystem watching, configuration

use crate::core::path::CanonicalPath;
use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-pulse
#[derive(Error, Debug)]
pub enum GitPulseError {
    // Path errors
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    // Command errors
    #[error("Cannot set up '{command}' command: {message}")]
    CommandSetup {
        command: &'static str,
        message: String,
    },

    #[error("git exited with code {exit_code}: {output}")]
    VcsExecution { exit_code: i32, output: String },

    #[error("Your local changes would be overwritten by checkout ({} file(s))", .paths.len())]
    UncommittedChanges { paths: Vec<CanonicalPath> },

    #[error("Not in a git repository")]
    NotInGitRepo,

    // Process errors
    #[error("Failed to start '{}': {source}", .program.display())]
    ProcessSpawn {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Watcher errors
    #[error("Failed to create filesystem watcher: {0}")]
    Watcher(#[from] notify::Error),

    #[error("Failed to watch '{}': {source}", .path.display())]
    WatchPath {
        path: PathBuf,
        source: notify::Error,
    },

    // Configuration errors
    #[error("Failed to read config file '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using GitPulseError
pub type Result<T> = std::result::Result<T, GitPulseError>;

impl GitPulseError {
    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason,
        }
    }

    /// Create a command setup error for a command missing required data
    pub fn command_setup(command: &'static str, message: impl Into<String>) -> Self {
        Self::CommandSetup {
            command,
            message: message.into(),
        }
    }

    /// Create a generic execution failure carrying the raw git output
    pub fn execution_failed(exit_code: i32, output: impl Into<String>) -> Self {
        Self::VcsExecution {
            exit_code,
            output: output.into(),
        }
    }

    /// Create an uncommitted changes conflict error
    pub fn uncommitted_changes(paths: Vec<CanonicalPath>) -> Self {
        Self::UncommittedChanges { paths }
    }

    /// Create a process spawn error
    pub fn process_spawn(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ProcessSpawn {
            program: program.into(),
            source,
        }
    }

    /// Create a watch path error
    pub fn watch_path(path: impl Into<PathBuf>, source: notify::Error) -> Self {
        Self::WatchPath {
            path: path.into(),
            source,
        }
    }

    /// Create a config read error
    pub fn config_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Paths reported by a blocked checkout, if this is such an error
    pub fn conflicting_paths(&self) -> Option<&[CanonicalPath]> {
        match self {
            Self::UncommittedChanges { paths } => Some(paths),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitPulseError::NotInGitRepo;
        assert_eq!(err.to_string(), "Not in a git repository");
    }

    #[test]
    fn test_invalid_path_error() {
        let err = GitPulseError::invalid_path("", "path is empty");
        assert_eq!(err.to_string(), "Invalid path '': path is empty");
    }

    #[test]
    fn test_command_setup_error() {
        let err = GitPulseError::command_setup("checkout", "name must be specified");
        assert_eq!(
            err.to_string(),
            "Cannot set up 'checkout' command: name must be specified"
        );
    }

    #[test]
    fn test_execution_failed_error() {
        let err = GitPulseError::execution_failed(128, "fatal: not a git repository");
        assert!(err.to_string().contains("128"));
        assert!(err.to_string().contains("fatal: not a git repository"));
    }

    #[test]
    fn test_uncommitted_changes_error() {
        let paths = vec![
            CanonicalPath::new("/repo/a.txt").unwrap(),
            CanonicalPath::new("/repo/b.txt").unwrap(),
        ];
        let err = GitPulseError::uncommitted_changes(paths);
        assert!(err.to_string().contains("2 file(s)"));
        assert_eq!(err.conflicting_paths().map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_conflicting_paths_for_other_errors() {
        let err = GitPulseError::NotInGitRepo;
        assert!(err.conflicting_paths().is_none());
    }

    #[test]
    fn test_process_spawn_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = GitPulseError::process_spawn("/usr/bin/git", io_err);
        assert!(err.to_string().contains("/usr/bin/git"));
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_config_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json").unwrap_err();
        let err = GitPulseError::config_parse("/test/config.json", json_err);
        assert!(err.to_string().contains("/test/config.json"));
        assert!(err.to_string().contains("Failed to parse"));
    }
}
