use crate::commands::open_current_repository;
use crate::core::{error::Result, print_success};

/// Switch to `name`, creating it first when `create_branch` is set
pub fn execute_checkout(name: &str, create_branch: bool, force: bool) -> Result<()> {
    let (repository, _) = open_current_repository()?;

    if create_branch {
        repository.create_branch(name, true)?;
        print_success(&format!("Switched to a new branch '{name}'"));
    } else {
        repository.checkout(name, force)?;
        print_success(&format!("Switched to branch '{name}'"));
    }

    Ok(())
}
