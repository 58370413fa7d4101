use crate::core::error::Result;
use crate::core::runner::ProcessRunner;
use crate::git::application::GitApplication;
use crate::git::command::{require, VcsCommand};
use serde::Serialize;

/// `git branch <name>`: create a branch without switching to it
#[derive(Debug, Clone)]
pub struct Branch {
    pub name: String,
}

impl Branch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl VcsCommand for Branch {
    type Output = String;

    fn setup(&self, runner: &mut ProcessRunner) -> Result<()> {
        let name = require("branch", "name", Some(self.name.as_str()))?;
        runner.arguments(["branch", name]);
        Ok(())
    }

    fn parse(&self, _app: &GitApplication, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// A local branch as listed by `git branch`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchEntry {
    pub name: String,
    pub is_current: bool,
}

/// `git branch --no-color`: list local branches
#[derive(Debug, Clone, Copy, Default)]
pub struct GetBranches;

impl VcsCommand for GetBranches {
    type Output = Vec<BranchEntry>;

    fn setup(&self, runner: &mut ProcessRunner) -> Result<()> {
        runner.arguments(["branch", "--no-color"]);
        Ok(())
    }

    fn parse(&self, _app: &GitApplication, text: &str) -> Result<Vec<BranchEntry>> {
        Ok(text
            .lines()
            .filter_map(|line| {
                // '*' marks the current branch, '+' one checked out in a linked worktree
                let is_current = line.starts_with('*');
                let name = line.trim_start_matches(['*', '+']).trim();
                // "(HEAD detached at 1a2b3c4)" is not a branch
                if name.is_empty() || name.starts_with('(') {
                    return None;
                }
                Some(BranchEntry {
                    name: name.to_string(),
                    is_current,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GitPulseError;
    use crate::core::runner::ProcessOutput;
    use crate::git::application::testing::{fake_app, setup_args};

    #[test]
    fn test_branch_arguments() {
        assert_eq!(setup_args(&Branch::new("topic")).unwrap(), vec!["branch", "topic"]);
        assert!(matches!(
            setup_args(&Branch::new(" ")),
            Err(GitPulseError::CommandSetup { command: "branch", .. })
        ));
    }

    #[test]
    fn test_get_branches_marks_current() {
        let (launcher, app) = fake_app("/srv/repo");
        launcher.respond("branch", ProcessOutput::success("  feature/x\n* main\n  release"));

        let branches = app.execute(&GetBranches).unwrap();
        assert_eq!(
            branches,
            vec![
                BranchEntry { name: "feature/x".into(), is_current: false },
                BranchEntry { name: "main".into(), is_current: true },
                BranchEntry { name: "release".into(), is_current: false },
            ]
        );
    }

    #[test]
    fn test_get_branches_strips_worktree_marker() {
        let (launcher, app) = fake_app("/srv/repo");
        launcher.respond("branch", ProcessOutput::success("+ feature\n* main"));

        let branches = app.execute(&GetBranches).unwrap();
        assert_eq!(
            branches,
            vec![
                BranchEntry {
                    name: "feature".to_string(),
                    is_current: false,
                },
                BranchEntry {
                    name: "main".to_string(),
                    is_current: true,
                },
            ]
        );
    }

    #[test]
    fn test_get_branches_skips_detached_head() {
        let (launcher, app) = fake_app("/srv/repo");
        launcher.respond("branch", ProcessOutput::success("* (HEAD detached at 1a2b3c4)\n  main"));

        let branches = app.execute(&GetBranches).unwrap();
        assert_eq!(branches.len(), 1);
        assert!(!branches[0].is_current);
    }
}
