use crate::core::error::{GitPulseError, Result};
use crate::core::path::CanonicalPath;
use crate::core::runner::{ProcessOutput, ProcessRunner};
use crate::git::application::GitApplication;
use crate::git::command::{path_arguments, require, VcsCommand};
use regex::Regex;
use std::sync::LazyLock;

static UNCOMMITTED_CHANGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Your local changes to the following files would be overwritten by checkout")
        .unwrap()
});

/// `git checkout [-f] [-b] <name>` or `git checkout [-f] -- <paths>`
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    pub name: Option<String>,
    pub paths: Vec<CanonicalPath>,
    pub force: bool,
    pub create_branch: bool,
}

impl Checkout {
    /// Switch to an existing branch or commit
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Restore files from the index, discarding working tree changes
    pub fn files(paths: Vec<CanonicalPath>) -> Self {
        Self {
            paths,
            ..Self::default()
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn create(mut self, create_branch: bool) -> Self {
        self.create_branch = create_branch;
        self
    }
}

impl VcsCommand for Checkout {
    type Output = String;

    fn setup(&self, runner: &mut ProcessRunner) -> Result<()> {
        let name = match (&self.name, self.paths.is_empty()) {
            (None, false) => None,
            (name, _) => Some(require("checkout", "name", name.as_deref())?.to_string()),
        };
        let paths = path_arguments(runner, &self.paths);

        runner.argument("checkout");
        if self.force {
            runner.argument("-f");
        }
        if self.create_branch {
            runner.argument("-b");
        }
        if let Some(name) = name {
            runner.argument(name);
        }
        if !paths.is_empty() {
            runner.argument("--").arguments(paths);
        }
        Ok(())
    }

    fn classify_error(&self, app: &GitApplication, output: ProcessOutput) -> GitPulseError {
        if !UNCOMMITTED_CHANGES.is_match(&output.text) {
            return GitPulseError::execution_failed(output.exit_code, output.text);
        }

        // The offending files follow the message, one per indented line.
        let root = app.working_directory();
        let paths = output
            .text
            .lines()
            .skip_while(|line| !line.starts_with(char::is_whitespace))
            .take_while(|line| line.starts_with(char::is_whitespace))
            .filter_map(|line| root.combine([line.trim()]).ok())
            .collect();
        GitPulseError::uncommitted_changes(paths)
    }

    fn parse(&self, _app: &GitApplication, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}
