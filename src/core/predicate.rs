//! Repository root detection.

use std::path::Path;

/// Name of the entry that marks a working copy root
pub const GIT_ENTRY: &str = ".git";

/// Returns true iff an entry named `.git` exists directly under `path`.
///
/// Only existence is checked: a `.git` directory, a `.git` file (worktrees,
/// submodules) or even a dangling `.git` symlink all count. A missing or
/// unreadable `path` yields `false`.
pub fn is_repository(path: &Path) -> bool {
    path.join(GIT_ENTRY).symlink_metadata().is_ok()
}
