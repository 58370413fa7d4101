use crate::core::error::Result;
use crate::core::runner::ProcessRunner;
use crate::git::application::GitApplication;
use crate::git::command::VcsCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevParseQuery {
    /// Absolute path of the working tree root
    TopLevelDirectory,
    /// Path of the current directory relative to the root
    Prefix,
}

/// `git rev-parse --show-toplevel | --show-prefix`
#[derive(Debug, Clone, Copy)]
pub struct RevParse {
    pub query: RevParseQuery,
}

impl RevParse {
    pub fn new(query: RevParseQuery) -> Self {
        Self { query }
    }
}

impl VcsCommand for RevParse {
    type Output = String;

    fn setup(&self, runner: &mut ProcessRunner) -> Result<()> {
        runner.argument("rev-parse");
        runner.argument(match self.query {
            RevParseQuery::TopLevelDirectory => "--show-toplevel",
            RevParseQuery::Prefix => "--show-prefix",
        });
        Ok(())
    }

    fn parse(&self, _app: &GitApplication, text: &str) -> Result<String> {
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::application::testing::setup_args;

    #[test]
    fn test_rev_parse_arguments() {
        assert_eq!(
            setup_args(&RevParse::new(RevParseQuery::Prefix)).unwrap(),
            vec!["rev-parse", "--show-prefix"]
        );
    }
}
