//! Git repository management and setup utilities
//!
//! Provides functions for creating test repositories and changing their state with
//! the plain `git` CLI, independently of the code under test.

#![allow(dead_code)]

use git_pulse::core::error::{GitPulseError, Result};
use git_pulse::CanonicalPath;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test repository setup result containing both the temporary directory
/// and the repository path. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Repository root as the library sees it
    pub fn root(&self) -> CanonicalPath {
        CanonicalPath::try_from(self.path.as_path()).expect("temp dir path is valid UTF-8")
    }

    /// Absolute canonical path of a file inside the repository
    pub fn file(&self, relative: &str) -> CanonicalPath {
        self.root().combine([relative]).expect("valid relative path")
    }
}

/// Runs git in `repo_path` and fails when it exits non-zero
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).current_dir(repo_path).output()?;
    if !output.status.success() {
        return Err(GitPulseError::execution_failed(
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr).trim_end(),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
}

/// Sets up a fresh git repository on branch `main`
///
/// The temporary directory is canonicalized so the path matches what
/// `git rev-parse --show-toplevel` reports (macOS links `/var` to `/private/var`).
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path().canonicalize()?;

    git(&repo_path, &["init", "-q"])?;
    git(&repo_path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;

    // Set git config to avoid prompts during tests
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;
    git(&repo_path, &["config", "commit.gpgsign", "false"])?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Sets up a git repository with an initial commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

/// Creates a file (and any missing parent directories) with the given content
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    let path = repo_path.join(filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename]).map(|_| ())
}

pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-q", "-m", message]).map(|_| ())
}

/// Removes a file from the filesystem (not from git)
pub fn remove_file(repo_path: &Path, filename: &str) -> Result<()> {
    fs::remove_file(repo_path.join(filename))?;
    Ok(())
}

/// Creates multiple test files with sequential content
pub fn create_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("content{}\nline 2\n", i + 1);
        create_file(repo_path, filename, &content)?;
    }
    Ok(())
}

/// Modifies multiple test files with new content
pub fn modify_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("modified{}\nline 2\nnew line\n", i + 1);
        create_file(repo_path, filename, &content)?;
    }
    Ok(())
}

/// Name of the checked-out branch according to plain git
pub fn current_branch(repo_path: &Path) -> Result<String> {
    git(repo_path, &["rev-parse", "--abbrev-ref", "HEAD"])
}
