//! git-pulse - live state of a git working tree.
//!
//! This library keeps an in-memory view of a repository (per-path status, current
//! branch, branch list) synchronized with the filesystem. The views are computed on
//! demand by running the `git` executable and are invalidated when a debounced
//! filesystem monitor reports relevant changes.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - [`RepositoryState`]: open a working tree, read cached views, subscribe to changes
//! - [`CanonicalPath`]: normalized path identity
//! - [`StatusCollection`] and [`FileStatus`]: merged per-path status
//! - [`CachedValue`]: lazily hydrated, invalidatable value
//!
//! Git itself is driven through the command objects in [`git`].

pub mod commands;
pub mod core;
pub mod git;

pub use core::{
    CachedValue,
    CanonicalPath,
    Config,
    FileStatus,
    // Error handling
    GitPulseError,
    MonitorOptions,
    PathStyle,
    // Repository state
    RepositoryEvent,
    RepositoryListener,
    RepositoryMonitor,
    RepositoryState,
    Result,

    StatusCollection,
    StatusEntry,
    StatusParser,
};
