//! The git executable bound to a working directory.
//!
//! [`GitApplication`] turns a [`VcsCommand`] into a [`ProcessRunner`], hands it to a
//! [`Launcher`] and lets the command interpret the result. Production code uses
//! [`SystemLauncher`]; tests substitute a launcher that returns canned output.

use crate::core::error::Result;
use crate::core::path::CanonicalPath;
use crate::core::runner::{ProcessOutput, ProcessRunner};
use crate::git::command::VcsCommand;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Runs prepared processes
pub trait Launcher: Send + Sync {
    /// Run to completion and capture the result
    fn run(&self, runner: &ProcessRunner) -> Result<ProcessOutput>;

    /// Start without waiting
    fn spawn(&self, runner: &ProcessRunner) -> Result<()>;
}

/// Launcher backed by real OS processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn run(&self, runner: &ProcessRunner) -> Result<ProcessOutput> {
        runner.execute()
    }

    fn spawn(&self, runner: &ProcessRunner) -> Result<()> {
        runner.execute_async()
    }
}

#[derive(Clone)]
pub struct GitApplication {
    executable: PathBuf,
    working_directory: CanonicalPath,
    launcher: Arc<dyn Launcher>,
}

impl GitApplication {
    pub fn new(executable: impl Into<PathBuf>, working_directory: CanonicalPath) -> Self {
        Self::with_launcher(executable, working_directory, Arc::new(SystemLauncher))
    }

    pub fn with_launcher(
        executable: impl Into<PathBuf>,
        working_directory: CanonicalPath,
        launcher: Arc<dyn Launcher>,
    ) -> Self {
        Self {
            executable: executable.into(),
            working_directory,
            launcher,
        }
    }

    /// Same executable and launcher, different working directory
    pub fn at(&self, working_directory: CanonicalPath) -> Self {
        Self {
            executable: self.executable.clone(),
            working_directory,
            launcher: Arc::clone(&self.launcher),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn working_directory(&self) -> &CanonicalPath {
        &self.working_directory
    }

    /// Run `command` and interpret its output
    pub fn execute<C: VcsCommand>(&self, command: &C) -> Result<C::Output> {
        let runner = self.prepare(command)?;
        let output = self.launcher.run(&runner)?;
        command.process_result(self, output)
    }

    /// Start `command` without waiting for or observing its outcome
    pub fn execute_async<C: VcsCommand>(&self, command: &C) -> Result<()> {
        let runner = self.prepare(command)?;
        self.launcher.spawn(&runner)
    }

    fn prepare<C: VcsCommand>(&self, command: &C) -> Result<ProcessRunner> {
        let mut runner = ProcessRunner::new(&self.executable, self.working_directory.as_std_path());
        command.setup(&mut runner)?;
        Ok(runner)
    }
}

impl fmt::Debug for GitApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitApplication")
            .field("executable", &self.executable)
            .field("working_directory", &self.working_directory)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Launcher returning canned output keyed by the first argument
    #[derive(Default)]
    pub struct FakeLauncher {
        responses: Mutex<HashMap<String, ProcessOutput>>,
        pub calls: Mutex<Vec<Vec<String>>>,
        pub spawned: Mutex<Vec<Vec<String>>>,
    }

    impl FakeLauncher {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn respond(&self, subcommand: &str, output: ProcessOutput) {
            self.responses.lock().insert(subcommand.to_string(), output);
        }

        pub fn calls_to(&self, subcommand: &str) -> usize {
            self.calls
                .lock()
                .iter()
                .filter(|args| args.first().map(String::as_str) == Some(subcommand))
                .count()
        }
    }

    impl Launcher for FakeLauncher {
        fn run(&self, runner: &ProcessRunner) -> Result<ProcessOutput> {
            let args = runner.args().to_vec();
            let key = args.first().cloned().unwrap_or_default();
            self.calls.lock().push(args);
            Ok(self
                .responses
                .lock()
                .get(&key)
                .cloned()
                .unwrap_or_else(|| ProcessOutput::success("")))
        }

        fn spawn(&self, runner: &ProcessRunner) -> Result<()> {
            self.spawned.lock().push(runner.args().to_vec());
            Ok(())
        }
    }

    /// Arguments a command pushes when run from `/srv/repo`
    pub fn setup_args<C: VcsCommand>(command: &C) -> Result<Vec<String>> {
        let mut runner = ProcessRunner::new("git", "/srv/repo");
        command.setup(&mut runner)?;
        Ok(runner.args().to_vec())
    }

    pub fn fake_app(root: &str) -> (Arc<FakeLauncher>, GitApplication) {
        let launcher = FakeLauncher::new();
        let path = CanonicalPath::new(root).unwrap();
        let app = GitApplication::with_launcher("git", path, launcher.clone());
        (launcher, app)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::fake_app;
    use crate::core::runner::ProcessOutput;
    use crate::git::{Init, RevParse, RevParseQuery};

    #[test]
    fn test_execute_routes_through_launcher() {
        let (launcher, app) = fake_app("/srv/repo");
        launcher.respond("rev-parse", ProcessOutput::success("/srv/repo"));

        let top = app.execute(&RevParse::new(RevParseQuery::TopLevelDirectory)).unwrap();
        assert_eq!(top, "/srv/repo");
        assert_eq!(launcher.calls.lock()[0], vec!["rev-parse", "--show-toplevel"]);
    }

    #[test]
    fn test_execute_async_uses_spawn() {
        let (launcher, app) = fake_app("/srv/repo");
        app.execute_async(&Init::default()).unwrap();
        assert_eq!(launcher.spawned.lock().len(), 1);
        assert!(launcher.calls.lock().is_empty());
    }

    #[test]
    fn test_at_keeps_launcher() {
        let (launcher, app) = fake_app("/srv/repo");
        let other = app.at(crate::core::path::CanonicalPath::new("/srv/other").unwrap());
        other.execute(&Init::default()).unwrap();
        assert_eq!(other.working_directory().actual(), "/srv/other");
        assert_eq!(launcher.calls_to("init"), 1);
    }
}
