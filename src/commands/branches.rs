use crate::commands::open_current_repository;
use crate::core::{error::Result, print_info, print_section_header};
use colored::*;

pub fn execute_branches() -> Result<()> {
    let (repository, _) = open_current_repository()?;
    let branches = repository.branches()?;

    if branches.is_empty() {
        print_info("No branches found. Make your first commit to create one.");
        return Ok(());
    }

    print_section_header("Local Branches");

    for branch in branches.iter() {
        if branch.is_current {
            println!(
                "{}{}{} {}",
                "[".bright_black(),
                "*".white(),
                "]".bright_black(),
                branch.name.blue()
            );
        } else {
            println!("    {}", branch.name.blue());
        }
    }

    println!();
    Ok(())
}
