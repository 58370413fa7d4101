use crate::commands::{open_current_repository, resolve_arguments};
use crate::core::{error::Result, print_success};

/// Stage `paths`, or every change when none are given
pub fn execute_add(paths: &[String]) -> Result<()> {
    let (repository, current_dir) = open_current_repository()?;
    let paths = resolve_arguments(&current_dir, paths)?;

    repository.stage(&paths)?;

    if paths.is_empty() {
        print_success("Staged all changes");
    } else {
        print_success(&format!("Staged {} path(s)", paths.len()));
    }
    Ok(())
}
