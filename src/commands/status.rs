use crate::commands::{display_path, open_current_repository};
use crate::core::{
    error::Result, format_file_status, print_info, print_section_header, CanonicalPath, FileStatus,
    StatusCollection, StatusEntry,
};
use colored::*;

pub fn execute_status(json: bool) -> Result<()> {
    let (repository, current_dir) = open_current_repository()?;
    let status = repository.status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(status.as_ref())?);
        return Ok(());
    }

    match repository.current_branch()? {
        Some(branch) => println!("\n{} {}", "On branch".bright_black(), branch.blue()),
        None => println!("\n{}", "HEAD detached".yellow()),
    }

    for anomaly in status.anomalies() {
        log::warn!("{} reported as {}", anomaly.path, anomaly.status);
    }

    if status.is_empty() {
        print_info("Nothing to commit, working tree clean");
        return Ok(());
    }

    print_grouped_status_sections(&status, &current_dir);
    Ok(())
}

fn print_grouped_status_sections(status: &StatusCollection, current_dir: &CanonicalPath) {
    let mut conflicted = Vec::new();
    let mut changed = Vec::new();
    let mut untracked = Vec::new();
    let mut ignored = Vec::new();

    for entry in status.entries() {
        // The destination line already names its source
        if entry.status.contains(FileStatus::RENAME_SOURCE) && status.related(entry).is_some() {
            continue;
        }

        match entry.status.primary() {
            Some(FileStatus::CONFLICTED) => conflicted.push(entry),
            Some(FileStatus::UNTRACKED) => untracked.push(entry),
            Some(FileStatus::IGNORED) => ignored.push(entry),
            Some(FileStatus::NOT_MODIFIED) | None => {}
            Some(_) => changed.push(entry),
        }
    }

    changed.sort_by_key(|entry| entry.status.sort_priority());

    print_section("Unmerged paths", &conflicted, status, current_dir);
    print_section("Changes", &changed, status, current_dir);
    print_section("Untracked files", &untracked, status, current_dir);
    print_section("Ignored files", &ignored, status, current_dir);
    println!();
}

fn print_section(
    header: &str,
    entries: &[&StatusEntry],
    status: &StatusCollection,
    current_dir: &CanonicalPath,
) {
    if entries.is_empty() {
        return;
    }

    print_section_header(header);
    for entry in entries {
        let path = display_path(&entry.path, current_dir);
        let related = status
            .related(entry)
            .map(|other| display_path(&other.path, current_dir));
        println!("  {}", format_file_status(entry, &path, related.as_deref()));
    }
}
