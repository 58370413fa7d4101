use crate::core::error::Result;
use crate::core::runner::ProcessRunner;
use crate::git::application::GitApplication;
use crate::git::command::VcsCommand;

/// `git init`
#[derive(Debug, Clone, Default)]
pub struct Init {
    pub bare: bool,
}

impl VcsCommand for Init {
    type Output = String;

    fn setup(&self, runner: &mut ProcessRunner) -> Result<()> {
        runner.argument("init");
        if self.bare {
            runner.argument("--bare");
        }
        Ok(())
    }

    fn parse(&self, _app: &GitApplication, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}
