//! Unified color system for file status output.
//!
//! Every status indicator printed by the CLI goes through [`get_status_color_style`],
//! so the same flag always renders in the same color.
//!
//! # Color Scheme
//! - **Modified**: Yellow
//! - **Added**: Green
//! - **Removed**: Red
//! - **Renamed/Copied**: Blue
//! - **Untracked**: Cyan
//! - **Ignored**: Bright black (muted)
//! - **Conflicted**: Red bold

use crate::core::file_status::FileStatus;
use crate::core::status::StatusEntry;
use colored::*;

/// Color function for the dominant flag of `status`
pub fn get_status_color_style(status: FileStatus) -> Box<dyn Fn(&str) -> ColoredString> {
    match status.primary() {
        Some(FileStatus::CONFLICTED) => Box::new(|text: &str| text.red().bold()),
        Some(FileStatus::ADDED) => Box::new(|text: &str| text.green()),
        Some(FileStatus::REMOVED) => Box::new(|text: &str| text.red()),
        Some(FileStatus::RENAME_SOURCE | FileStatus::RENAME_DESTINATION) => {
            Box::new(|text: &str| text.blue())
        }
        Some(FileStatus::COPY_SOURCE | FileStatus::COPY_DESTINATION) => {
            Box::new(|text: &str| text.blue())
        }
        Some(FileStatus::MODIFIED) => Box::new(|text: &str| text.yellow()),
        Some(FileStatus::UNTRACKED) => Box::new(|text: &str| text.cyan()),
        Some(FileStatus::IGNORED) => Box::new(|text: &str| text.bright_black()),
        _ => Box::new(|text: &str| text.white()),
    }
}

/// Colored status code padded to two columns
pub fn get_aligned_status(status: FileStatus) -> ColoredString {
    let color_fn = get_status_color_style(status);
    color_fn(&format!("{:<2}", status.as_str()))
}

/// Get colored file path using the status color
pub fn get_colored_path(status: FileStatus, path: &str) -> ColoredString {
    let color_fn = get_status_color_style(status);
    color_fn(path)
}

/// One status line: code, description and path, plus the related path of a
/// rename or copy pair
pub fn format_file_status(entry: &StatusEntry, path: &str, related: Option<&str>) -> String {
    let status_colored = get_aligned_status(entry.status);
    let description = format!("{:<14}", entry.status.description()).bright_black();
    let path_colored = get_colored_path(entry.status, path);

    match related {
        Some(other) if entry.status.contains(FileStatus::RENAME_DESTINATION)
            || entry.status.contains(FileStatus::COPY_DESTINATION) =>
        {
            format!("{status_colored} {description} {} -> {path_colored}", other.bright_black())
        }
        Some(other) => {
            format!("{status_colored} {description} {path_colored} -> {}", other.bright_black())
        }
        None => format!("{status_colored} {description} {path_colored}"),
    }
}
