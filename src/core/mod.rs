//! Core functionality for git-pulse.
//!
//! This module provides the repository state engine: path normalization, status
//! parsing, lazily hydrated caches, filesystem monitoring and the orchestrator that
//! ties them together, plus the error type and CLI output helpers.

pub mod cached_value;
pub mod colors;
pub mod config;
pub mod dirs;
pub mod error;
pub mod file_status;
pub mod monitor;
pub mod output;
pub mod path;
pub mod repository;
pub mod runner;
pub mod status;

// === Error handling ===
pub use error::{GitPulseError, Result};

// === Paths ===
// Normalized, comparable paths with host-specific spelling rules
pub use path::{CanonicalPath, PathStyle};

// === Caching ===
pub use cached_value::CachedValue;

// === Status model ===
// Flag set per path, the porcelain parser and the merged per-path view
pub use file_status::FileStatus;
pub use status::{StatusCollection, StatusEntry, StatusParser};

// === Process execution ===
pub use runner::{ProcessOutput, ProcessRunner};

// === Filesystem monitoring ===
pub use monitor::{
    ChangeClassifier, ChangeSink, MonitorEvent, MonitorOptions, NotifyWatchProvider,
    RepositoryMonitor, WatchGuard, WatchHandler, WatchProvider,
};

// === Repository state ===
pub use repository::{RepositoryEvent, RepositoryListener, RepositoryState};

// === Configuration ===
pub use config::Config;

// === Color system ===
pub use colors::{format_file_status, get_aligned_status, get_colored_path, get_status_color_style};

// === Output formatting ===
pub use output::{print_error, print_error_with_paths, print_info, print_section_header, print_success};
