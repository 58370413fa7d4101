pub mod add;
pub mod branches;
pub mod checkout;
pub mod diff;
pub mod reset;
pub mod status;
pub mod watch;

pub use add::*;
pub use branches::*;
pub use checkout::*;
pub use diff::*;
pub use reset::*;
pub use status::*;
pub use watch::*;

use crate::core::{
    error::{GitPulseError, Result},
    CanonicalPath, Config, RepositoryState,
};
use std::env;

/// Working directory of the process as a canonical path
pub(crate) fn current_directory() -> Result<CanonicalPath> {
    let current_dir = env::current_dir()?;
    CanonicalPath::try_from(current_dir.as_path())
}

/// Repository state configured from the user's config file
pub(crate) fn repository_state() -> Result<RepositoryState> {
    let config = Config::load_or_default()?;
    log::debug!("Using git executable {}", config.git_executable.display());
    Ok(RepositoryState::new(&config))
}

/// Open `directory`, treating a plain folder as an error for CLI purposes
pub(crate) fn open_repository(state: &RepositoryState, directory: &CanonicalPath) -> Result<()> {
    if state.open(directory)? {
        Ok(())
    } else {
        Err(GitPulseError::NotInGitRepo)
    }
}

/// Open the repository containing the current directory
pub(crate) fn open_current_repository() -> Result<(RepositoryState, CanonicalPath)> {
    let current_dir = current_directory()?;
    let state = repository_state()?;
    open_repository(&state, &current_dir)?;
    Ok((state, current_dir))
}

/// Resolve command-line path arguments against `base`
pub(crate) fn resolve_arguments(base: &CanonicalPath, arguments: &[String]) -> Result<Vec<CanonicalPath>> {
    arguments
        .iter()
        .map(|argument| {
            let path = CanonicalPath::with_style(argument, base.style())?;
            if path.is_relative() {
                base.combine([argument])
            } else {
                Ok(path)
            }
        })
        .collect()
}

/// Path as shown to the user: relative to `base` when below it
pub(crate) fn display_path(path: &CanonicalPath, base: &CanonicalPath) -> String {
    if base.is_parent_of(path) {
        path.relative_to(base).actual().to_string()
    } else {
        path.actual().to_string()
    }
}
