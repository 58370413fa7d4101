use crate::core::error::Result;
use crate::core::runner::ProcessRunner;
use crate::git::application::GitApplication;
use crate::git::command::VcsCommand;

/// `git commit [-a] [-m <message>]`
#[derive(Debug, Clone, Default)]
pub struct Commit {
    pub auto_stage: bool,
    pub message: Option<String>,
}

impl Commit {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            auto_stage: false,
            message: Some(message.into()),
        }
    }
}

impl VcsCommand for Commit {
    type Output = String;

    fn setup(&self, runner: &mut ProcessRunner) -> Result<()> {
        runner.argument("commit");
        if self.auto_stage {
            runner.argument("-a");
        }
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            runner.arguments(["-m", message]);
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
    fn test_commit_arguments() {
        assert_eq!(setup_args(&Commit::default()).unwrap(), vec!["commit"]);

        let commit = Commit {
            auto_stage: true,
            message: Some("fix parser".into()),
        };
        assert_eq!(setup_args(&commit).unwrap(), vec!["commit", "-a", "-m", "fix parser"]);
    }
}
