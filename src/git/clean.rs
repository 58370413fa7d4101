use crate::core::error::Result;
use crate::core::path::CanonicalPath;
use crate::core::runner::ProcessRunner;
use crate::core::status::StatusParser;
use crate::git::application::GitApplication;
use crate::git::command::VcsCommand;

/// Which untracked files `git clean` considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanTarget {
    /// Only files matched by ignore rules (`-X`)
    Ignored,
    #[default]
    UntrackedButNotIgnored,
    /// Untracked and ignored files (`-x`)
    AllUntracked,
}

/// `git clean`, a dry run by default that lists what would be removed
#[derive(Debug, Clone)]
pub struct Clean {
    pub dry_run: bool,
    pub target: CleanTarget,
    pub include_directories: bool,
}

impl Default for Clean {
    fn default() -> Self {
        Self {
            dry_run: true,
            target: CleanTarget::default(),
            include_directories: true,
        }
    }
}

impl Clean {
    /// Dry run listing ignored files, and ignored directories as a whole
    pub fn ignored_files() -> Self {
        Self {
            dry_run: true,
            target: CleanTarget::Ignored,
            include_directories: true,
        }
    }
}

impl VcsCommand for Clean {
    type Output = Vec<CanonicalPath>;

    fn setup(&self, runner: &mut ProcessRunner) -> Result<()> {
        runner.arguments(["clean", if self.dry_run { "-n" } else { "-f" }]);
        if self.include_directories {
            runner.argument("-d");
        }
        match self.target {
            CleanTarget::AllUntracked => {
                runner.argument("-x");
            }
            CleanTarget::Ignored => {
                runner.argument("-X");
            }
            CleanTarget::UntrackedButNotIgnored => {}
        }
        Ok(())
    }

    fn parse(&self, app: &GitApplication, text: &str) -> Result<Vec<CanonicalPath>> {
        let parser = StatusParser::new(app.working_directory().clone());
        Ok(text
            .lines()
            .filter_map(|line| {
                line.strip_prefix("Would remove ")
                    .or_else(|| line.strip_prefix("Removing "))
            })
            .filter_map(|path| parser.resolve(path.trim()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::runner::ProcessOutput;
    use crate::git::application::testing::{fake_app, setup_args};

    #[test]
    fn test_clean_arguments() {
        assert_eq!(setup_args(&Clean::default()).unwrap(), vec!["clean", "-n", "-d"]);
        assert_eq!(setup_args(&Clean::ignored_files()).unwrap(), vec!["clean", "-n", "-d", "-X"]);

        let force_all = Clean {
            dry_run: false,
            target: CleanTarget::AllUntracked,
            include_directories: true,
        };
        assert_eq!(setup_args(&force_all).unwrap(), vec!["clean", "-f", "-d", "-x"]);
    }

    #[test]
    fn test_clean_parses_would_remove_lines() {
        let (launcher, app) = fake_app("/srv/repo");
        launcher.respond(
            "clean",
            ProcessOutput::success("Would remove build.log\nWould remove target/\nWould skip repository sub\n"),
        );

        let paths = app.execute(&Clean::ignored_files()).unwrap();
        let actual: Vec<_> = paths.iter().map(CanonicalPath::actual).collect();
        assert_eq!(actual, vec!["/srv/repo/build.log", "/srv/repo/target"]);
    }
}
