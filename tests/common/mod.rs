//! Shared test utilities for git-pulse
//!
//! Integration tests drive the real `git` executable in temporary repositories.

pub mod assertions;
pub mod fixtures;
pub mod repository;
