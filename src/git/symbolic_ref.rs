use crate::core::error::Result;
use crate::core::runner::{ProcessOutput, ProcessRunner};
use crate::git::application::GitApplication;
use crate::git::command::{require, VcsCommand};

const BRANCH_PREFIX: &str = "refs/heads/";

/// `git symbolic-ref -q <name>`: the branch a symbolic ref points to
///
/// Yields `None` when the ref is not symbolic, e.g. on a detached HEAD.
#[derive(Debug, Clone)]
pub struct SymbolicRef {
    pub name: String,
    pub short: bool,
}

impl SymbolicRef {
    pub fn head() -> Self {
        Self::new("HEAD")
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: false,
        }
    }
}

impl VcsCommand for SymbolicRef {
    type Output = Option<String>;

    fn setup(&self, runner: &mut ProcessRunner) -> Result<()> {
        let name = require("symbolic-ref", "name", Some(self.name.as_str()))?;
        runner.arguments(["symbolic-ref", "-q"]);
        if self.short {
            runner.argument("--short");
        }
        runner.argument(name);
        Ok(())
    }

    fn process_result(&self, app: &GitApplication, output: ProcessOutput) -> Result<Option<String>> {
        // Quiet mode fails silently for a non-symbolic ref
        if !output.is_success() && output.text.trim().is_empty() {
            return Ok(None);
        }
        if !output.is_success() {
            return Err(self.classify_error(app, output));
        }
        self.parse(app, &output.text)
    }

    fn parse(&self, _app: &GitApplication, text: &str) -> Result<Option<String>> {
        let target = text.trim();
        if target.is_empty() {
            return Ok(None);
        }
        Ok(Some(target.strip_prefix(BRANCH_PREFIX).unwrap_or(target).to_string()))
    }
}
