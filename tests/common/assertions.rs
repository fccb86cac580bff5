//! Common assertion helpers for test output validation

#![allow(dead_code)]

use predicates::prelude::*;
use std::path::Path;

/// Checks for a numbered row, e.g. `[2] Scan for repositories...`
pub fn has_row(position: usize, label: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("[{position}] {label}"))
}

/// Checks that `path` is the current row
pub fn has_current(path: &Path) -> impl Predicate<str> {
    predicates::str::contains(format!("[*] {}", path.display()))
}

pub fn lists_path(path: &Path) -> impl Predicate<str> {
    predicates::str::contains(path.display().to_string())
}

pub fn has_rescan_row() -> impl Predicate<str> {
    predicates::str::contains("Scan for repositories...")
}

pub fn has_placeholder_row() -> impl Predicate<str> {
    predicates::str::contains("No repos!")
}

pub fn has_error(message: &str) -> impl Predicate<str> {
    predicates::str::contains("✕ Error:").and(predicates::str::contains(message.to_string()))
}
