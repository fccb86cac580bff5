//! Unified output formatting utilities for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, blue for repository paths, bright_black for sentinel rows
//! - **Standardized spacing**: Newline before and after all command outputs

use crate::core::discovery::DisplayEntry;
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

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message with consistent styling
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

/// Formats one row of the displayed list
///
/// # Format
/// ```text
/// [1] /work/game/Assets/Plugins/Net
/// [*] /work/game/Assets/Plugins/Audio
/// [3] Scan for repositories...
/// ```
///
/// The current row shows `*` in place of its 1-based number.
pub fn format_entry(position: usize, entry: &DisplayEntry, current: bool) -> String {
    let marker = if current {
        "*".to_string()
    } else {
        position.to_string()
    };
    let label = match entry {
        DisplayEntry::Repository(_) => entry.to_string().blue(),
        DisplayEntry::NoRepositories | DisplayEntry::Rescan => entry.to_string().bright_black(),
    };

    format!(
        "{}{}{} {}",
        "[".bright_black(),
        marker.white(),
        "]".bright_black(),
        label
    )
}

pub fn print_entry(position: usize, entry: &DisplayEntry, current: bool) {
    println!("{}", format_entry(position, entry, current));
}
