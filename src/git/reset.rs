use crate::core::error::Result;
use crate::core::path::CanonicalPath;
use crate::core::runner::ProcessRunner;
use crate::git::application::GitApplication;
use crate::git::command::{path_arguments, VcsCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Move HEAD only (`--soft`)
    Soft,
    /// Reset the index (`--mixed`)
    Mixed,
    /// Reset index and working tree (`--hard`)
    Hard,
    /// Reset, keeping local changes to unaffected files (`--keep`)
    Keep,
}

impl ResetMode {
    fn flag(self) -> &'static str {
        match self {
            ResetMode::Soft => "--soft",
            ResetMode::Mixed => "--mixed",
            ResetMode::Hard => "--hard",
            ResetMode::Keep => "--keep",
        }
    }
}

/// `git reset [<mode>] [-q] [<commit>] -- [<paths>]`
///
/// Without a mode and with paths this unstages those paths.
#[derive(Debug, Clone)]
pub struct Reset {
    pub mode: Option<ResetMode>,
    pub quiet: bool,
    pub commit: Option<String>,
    pub paths: Vec<CanonicalPath>,
}

impl Default for Reset {
    fn default() -> Self {
        Self {
            mode: None,
            quiet: true,
            commit: None,
            paths: Vec::new(),
        }
    }
}

impl Reset {
    pub fn paths(paths: Vec<CanonicalPath>) -> Self {
        Self {
            paths,
            ..Self::default()
        }
    }
}

impl VcsCommand for Reset {
    type Output = String;

    fn setup(&self, runner: &mut ProcessRunner) -> Result<()> {
        let paths = path_arguments(runner, &self.paths);
        runner.argument("reset");
        if let Some(mode) = self.mode {
            runner.argument(mode.flag());
        }
        if self.quiet {
            runner.argument("-q");
        }
        if let Some(commit) = self.commit.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            runner.argument(commit);
        }
        runner.argument("--").arguments(paths);
        Ok(())
    }

    fn parse(&self, _app: &GitApplication, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}
