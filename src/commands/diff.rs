use crate::commands::{open_current_repository, resolve_arguments};
use crate::core::{error::Result, print_info, print_success};

/// Show unstaged changes, inline or in the configured diff tool
pub fn execute_diff(path: Option<String>, tool: bool) -> Result<()> {
    let (repository, current_dir) = open_current_repository()?;
    let path = match path {
        Some(path) => resolve_arguments(&current_dir, &[path])?.pop(),
        None => None,
    };

    if tool {
        repository.display_unstaged_changes_async(path.as_ref())?;
        print_success("Opened diff tool");
        return Ok(());
    }

    let diff = repository.unstaged_changes(path.as_ref())?;
    if diff.is_empty() {
        print_info("No unstaged changes");
    } else {
        println!("{diff}");
    }
    Ok(())
}
