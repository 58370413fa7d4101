//! Unified output formatting for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, green for success, bright_black for
//!   secondary detail
//! - **Standardized spacing**: Newline before and after all command outputs

use crate::core::path::CanonicalPath;
use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Prints an error followed by an indented list of offending paths
///
/// Used for checkout conflicts, where git names every file that blocks the switch.
pub fn print_error_with_paths(message: &str, paths: &[CanonicalPath]) {
    println!("\n{} {}", "✕ Error:".red(), message.white());
    for path in paths {
        println!("  {}", path.actual().bright_black());
    }
    println!();
}

/// Formats and prints a success message with consistent styling
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_does_not_panic() {
        print_error("Test error message");
    }

    #[test]
    fn test_print_error_with_paths_does_not_panic() {
        print_error_with_paths(
            "Checkout blocked",
            &[CanonicalPath::new("/srv/repo/a.txt").unwrap()],
        );
    }

    #[test]
    fn test_print_success_does_not_panic() {
        print_success("Operation completed");
    }

    #[test]
    fn test_print_info_does_not_panic() {
        print_info("Information message");
    }

    #[test]
    fn test_print_section_header_does_not_panic() {
        print_section_header("Local Branches");
    }
}
