use crate::core::error::Result;
use crate::core::path::CanonicalPath;
use crate::core::runner::ProcessRunner;
use crate::core::status::{StatusEntry, StatusParser};
use crate::git::application::GitApplication;
use crate::git::command::{path_arguments, VcsCommand};

/// `git status --porcelain --untracked-files=all [-- targets]`
#[derive(Debug, Clone, Default)]
pub struct Status {
    pub targets: Vec<CanonicalPath>,
}

impl Status {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(targets: Vec<CanonicalPath>) -> Self {
        Self { targets }
    }
}

impl VcsCommand for Status {
    type Output = Vec<StatusEntry>;

    fn setup(&self, runner: &mut ProcessRunner) -> Result<()> {
        let targets = path_arguments(runner, &self.targets);
        // Keep status read-only so refreshing it doesn't rewrite .git/index
        runner.env("GIT_OPTIONAL_LOCKS", "0");
        runner.arguments(["status", "--porcelain", "--untracked-files=all"]);
        if !targets.is_empty() {
            runner.argument("--").arguments(targets);
        }
        Ok(())
    }

    fn parse(&self, app: &GitApplication, text: &str) -> Result<Vec<StatusEntry>> {
        Ok(StatusParser::new(app.working_directory().clone()).parse(text))
    }
}
