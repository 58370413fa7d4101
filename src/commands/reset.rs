use crate::commands::{open_current_repository, resolve_arguments};
use crate::core::{error::Result, print_success};

/// Unstage `paths`, or everything when none are given
pub fn execute_reset(paths: &[String]) -> Result<()> {
    let (repository, current_dir) = open_current_repository()?;
    let paths = resolve_arguments(&current_dir, paths)?;

    repository.unstage(&paths)?;

    if paths.is_empty() {
        print_success("Unstaged all changes");
    } else {
        print_success(&format!("Unstaged {} path(s)", paths.len()));
    }
    Ok(())
}
