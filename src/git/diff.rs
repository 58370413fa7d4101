use crate::core::error::Result;
use crate::core::path::CanonicalPath;
use crate::core::runner::ProcessRunner;
use crate::git::application::GitApplication;
use crate::git::command::{path_arguments, VcsCommand};

/// `git diff` or `git difftool --no-prompt`, optionally limited to one path
#[derive(Debug, Clone, Default)]
pub struct Diff {
    pub view_in_tool: bool,
    pub path: Option<CanonicalPath>,
}

impl VcsCommand for Diff {
    type Output = String;

    fn setup(&self, runner: &mut ProcessRunner) -> Result<()> {
        let paths = path_arguments(runner, self.path.as_slice());
        if self.view_in_tool {
            runner.arguments(["difftool", "--no-prompt"]);
        } else {
            runner.argument("diff");
        }
        if !paths.is_empty() {
            runner.argument("--").arguments(paths);
        }
        Ok(())
    }

    fn parse(&self, _app: &GitApplication, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}
