//! Strategy trait shared by every git command.
//!
//! A command only builds an argument list and interprets output; all I/O goes
//! through [`GitApplication`].

use crate::core::error::{GitPulseError, Result};
use crate::core::path::CanonicalPath;
use crate::core::runner::{ProcessOutput, ProcessRunner};
use crate::git::application::GitApplication;

pub trait VcsCommand {
    type Output;

    /// Push the command's arguments, failing when required data is missing
    fn setup(&self, runner: &mut ProcessRunner) -> Result<()>;

    /// Interpret a finished process
    fn process_result(&self, app: &GitApplication, output: ProcessOutput) -> Result<Self::Output> {
        if !output.is_success() {
            return Err(self.classify_error(app, output));
        }
        self.parse(app, &output.text)
    }

    /// Map a non-zero exit to an error; recognizable failures get typed variants
    fn classify_error(&self, _app: &GitApplication, output: ProcessOutput) -> GitPulseError {
        GitPulseError::execution_failed(output.exit_code, output.text)
    }

    fn parse(&self, app: &GitApplication, text: &str) -> Result<Self::Output>;
}

/// Reject missing or blank required values before anything is spawned
pub(crate) fn require<'a>(command: &'static str, field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(GitPulseError::command_setup(
            command,
            format!("{field} must be specified"),
        )),
    }
}

/// Paths as arguments, relative to the runner's working directory when below it
pub(crate) fn path_arguments(runner: &ProcessRunner, paths: &[CanonicalPath]) -> Vec<String> {
    let base = CanonicalPath::try_from(runner.working_directory()).ok();
    paths
        .iter()
        .map(|path| match &base {
            Some(base) if !path.is_relative() && base.is_parent_of(path) => {
                git_spelling(&path.relative_to(base))
            }
            _ => git_spelling(path),
        })
        .collect()
}

// git expects '/' separators on every platform
fn git_spelling(path: &CanonicalPath) -> String {
    if path.style().separator() == '\\' {
        path.actual().replace('\\', "/")
    } else {
        path.actual().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("branch", "name", None).is_err());
        assert!(require("branch", "name", Some("   ")).is_err());
        assert_eq!(require("branch", "name", Some(" main ")).unwrap(), "main");
    }

    #[test]
    fn test_path_arguments_are_relative_to_working_directory() {
        let runner = ProcessRunner::new("git", "/srv/repo");
        let paths = vec![
            CanonicalPath::new("/srv/repo/src/lib.rs").unwrap(),
            CanonicalPath::new("/elsewhere/file").unwrap(),
            CanonicalPath::new("docs/readme.md").unwrap(),
        ];
        assert_eq!(
            path_arguments(&runner, &paths),
            vec!["src/lib.rs", "/elsewhere/file", "docs/readme.md"]
        );
    }
}
