//! Predefined repository scenarios
//!
//! Provides functions for creating repositories with specific file states to test
//! various git scenarios consistently.

#![allow(dead_code)]

use super::repository::*;
use git_pulse::core::error::Result;

/// Scenario: committed files, some modified, plus untracked ones
///
/// `file1.txt`..`file3.txt` are modified, `file4.txt` and `file5.txt` are untracked.
pub fn create_multi_file_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_test_files(&repo.path, &["file1.txt", "file2.txt", "file3.txt"])?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    modify_test_files(&repo.path, &["file1.txt", "file2.txt", "file3.txt"])?;
    create_test_files(&repo.path, &["file4.txt", "file5.txt"])?;

    Ok(repo)
}

/// Scenario: an ignore rule with one matching file and one tracked file
///
/// `.gitignore` ignores `*.log`; `debug.log` exists and `tracked.txt` is committed.
pub fn create_repo_with_ignored_file() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, ".gitignore", "*.log\n")?;
    create_file(&repo.path, "tracked.txt", "tracked\n")?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    create_file(&repo.path, "debug.log", "noise\n")?;

    Ok(repo)
}

/// Scenario: `target/` is ignored as a directory and holds a build artifact
pub fn create_repo_with_ignored_directory() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, ".gitignore", "target/\n")?;
    create_file(&repo.path, "tracked.txt", "tracked\n")?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    create_file(&repo.path, "target/out.o", "artifact\n")?;

    Ok(repo)
}

/// Scenario: `feature` branch whose `shared.txt` differs from `main`
///
/// HEAD is on `main` and `shared.txt` carries an uncommitted edit, so switching
/// to `feature` without force is refused by git.
pub fn create_conflicting_branches_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "shared.txt", "main version\n")?;
    git_add(&repo.path, "shared.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    git(&repo.path, &["checkout", "-q", "-b", "feature"])?;
    create_file(&repo.path, "shared.txt", "feature version\n")?;
    git_commit_all(&repo, "Feature change")?;

    git(&repo.path, &["checkout", "-q", "main"])?;
    create_file(&repo.path, "shared.txt", "local edit\n")?;

    Ok(repo)
}

fn git_commit_all(repo: &TestRepo, message: &str) -> Result<()> {
    git(&repo.path, &["commit", "-q", "-a", "-m", message]).map(|_| ())
}
