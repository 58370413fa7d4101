//! Common assertion helpers for test output validation

#![allow(dead_code)]

use git_pulse::core::error::Result;
use git_pulse::{RepositoryEvent, StatusCollection};
use predicates::prelude::*;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

/// Creates a predicate that checks for git repository error messages
pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

pub fn has_branch_info(branch: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("On branch {branch}"))
}

/// Creates a predicate that checks for a status line of the given description
pub fn has_status(description: &str, path: &str) -> impl Predicate<str> {
    predicates::str::contains(description).and(predicates::str::contains(path.to_string()))
}

/// Waits until `events` yields an event matching `wanted` or `timeout` passes
pub fn wait_for_event(
    events: &Receiver<RepositoryEvent>,
    timeout: Duration,
    wanted: impl Fn(&RepositoryEvent) -> bool,
) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return false;
        }
        match events.recv_timeout(remaining) {
            Ok(event) if wanted(&event) => return true,
            Ok(_) => continue,
            Err(_) => return false,
        }
    }
}

/// Polls `read` until `done` accepts the status or `timeout` passes
pub fn eventually_status(
    timeout: Duration,
    read: impl Fn() -> Result<std::sync::Arc<StatusCollection>>,
    done: impl Fn(&StatusCollection) -> bool,
) -> Result<bool> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if done(read()?.as_ref()) {
            return Ok(true);
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    Ok(false)
}
