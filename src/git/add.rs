use crate::core::error::Result;
use crate::core::path::CanonicalPath;
use crate::core::runner::ProcessRunner;
use crate::git::application::GitApplication;
use crate::git::command::{path_arguments, VcsCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddTarget {
    /// New, modified and deleted files (`-A`)
    #[default]
    AllChanges,
    /// Only files git already tracks (`-u`)
    OnlyTracked,
}

/// `git add`; with no files the whole working tree is staged
#[derive(Debug, Clone, Default)]
pub struct Add {
    pub target: AddTarget,
    pub allow_ignored: bool,
    pub files: Vec<CanonicalPath>,
}

impl Add {
    pub fn files(files: Vec<CanonicalPath>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }
}

impl VcsCommand for Add {
    type Output = String;

    fn setup(&self, runner: &mut ProcessRunner) -> Result<()> {
        let files = path_arguments(runner, &self.files);
        runner.argument("add");
        if self.allow_ignored {
            runner.argument("-f");
        }
        runner.argument(match self.target {
            AddTarget::AllChanges => "-A",
            AddTarget::OnlyTracked => "-u",
        });
        runner.argument("--");
        if files.is_empty() {
            runner.argument(".");
        } else {
            runner.arguments(files);
        }
        Ok(())
    }

    fn parse(&self, _app: &GitApplication, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::application::testing::setup_args;

    #[test]
    fn test_add_arguments() {
        assert_eq!(setup_args(&Add::default()).unwrap(), vec!["add", "-A", "--", "."]);

        let add = Add {
            target: AddTarget::OnlyTracked,
            allow_ignored: true,
            files: vec![CanonicalPath::new("/srv/repo/a b.txt").unwrap()],
        };
        assert_eq!(setup_args(&add).unwrap(), vec!["add", "-f", "-u", "--", "a b.txt"]);
    }
}
