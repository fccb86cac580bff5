//! Candidate directory enumeration for repository discovery.
//!
//! This module produces the ordered, lazy sequence of directories that discovery
//! checks for a `.git` entry: a handful of explicit roots around the project
//! followed by every directory nested under the assets root.
//!
//! # Public API
//! - [`ProjectLayout`]: Names of the packages and assets directories
//! - [`candidate_roots`]: Full candidate sequence for a project
//! - [`transitive_subdirectories`]: Depth-first, pre-order walk of a subtree
//!
//! # Walk Guarantees
//! - **Deterministic order**: children are visited sorted by file name
//! - **Partial access**: a directory that cannot be listed has no children
//! - **Cycle safety**: links back to an ancestor are reported by `walkdir` and
//!   dropped; a second link to an already visited directory is skipped
//! - **Git metadata**: `.git` directories are never descended into

use crate::core::predicate::GIT_ENTRY;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names inside a project that discovery looks into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    pub packages_dir: String,
    pub assets_dir: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            packages_dir: "Packages".to_string(),
            assets_dir: "Assets".to_string(),
        }
    }
}

/// Ordered candidate directories for `project_dir`:
/// parent, project, each package directory, assets root, then the assets subtree.
pub fn candidate_roots(
    project_dir: &Path,
    layout: &ProjectLayout,
) -> impl Iterator<Item = PathBuf> {
    let mut explicit = Vec::new();

    if let Some(parent) = project_dir.parent() {
        if !parent.as_os_str().is_empty() {
            explicit.push(parent.to_path_buf());
        }
    }
    explicit.push(project_dir.to_path_buf());
    explicit.extend(list_child_dirs(&project_dir.join(&layout.packages_dir)));

    let assets_dir = project_dir.join(&layout.assets_dir);
    explicit.push(assets_dir.clone());

    explicit
        .into_iter()
        .chain(transitive_subdirectories(&assets_dir))
}

fn directory_walk(root: &Path) -> WalkDir {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
}

fn into_path(entry: walkdir::Result<DirEntry>) -> Option<PathBuf> {
    match entry {
        Ok(entry) => Some(entry.into_path()),
        Err(e) => {
            log::debug!("Skipping unwalkable entry: {e}");
            None
        }
    }
}

/// Every directory below `root` (excluding `root`), depth-first, parent before children.
pub fn transitive_subdirectories(root: &Path) -> impl Iterator<Item = PathBuf> {
    let mut visited = HashSet::new();
    if let Ok(canonical) = root.canonicalize() {
        visited.insert(canonical);
    }

    directory_walk(root)
        .into_iter()
        .filter_entry(move |entry| {
            if !entry.file_type().is_dir() || entry.file_name() == GIT_ENTRY {
                return false;
            }
            match entry.path().canonicalize() {
                Ok(canonical) => {
                    let first_visit = visited.insert(canonical);
                    if !first_visit {
                        log::debug!("Skipping aliased directory '{}'", entry.path().display());
                    }
                    first_visit
                }
                Err(e) => {
                    log::debug!("Skipping vanished directory '{}': {e}", entry.path().display());
                    false
                }
            }
        })
        .filter_map(into_path)
}

/// Immediate subdirectories of `dir` sorted by name. Unlistable directories have none.
pub fn list_child_dirs(dir: &Path) -> Vec<PathBuf> {
    directory_walk(dir)
        .max_depth(1)
        .into_iter()
        .filter_entry(|entry| entry.file_type().is_dir())
        .filter_map(into_path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_dirs(root: &Path, dirs: &[&str]) -> std::io::Result<()> {
        for dir in dirs {
            fs::create_dir_all(root.join(dir))?;
        }
        Ok(())
    }

    #[test]
    fn test_transitive_subdirectories_pre_order() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        make_dirs(root, &["b/x", "a/z", "a/y/deep"])?;
        fs::write(root.join("a/file.txt"), "not a dir")?;

        let walked: Vec<PathBuf> = transitive_subdirectories(root).collect();

        let expected: Vec<PathBuf> = ["a", "a/y", "a/y/deep", "a/z", "b", "b/x"]
            .iter()
            .map(|p| root.join(p))
            .collect();
        assert_eq!(walked, expected);
        Ok(())
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let walked: Vec<PathBuf> =
            transitive_subdirectories(Path::new("/tmp/definitely/not/here")).collect();
        assert!(walked.is_empty());
    }

    #[test]
    fn test_candidate_roots_order() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let project = temp_dir.path().join("Game");
        make_dirs(&project, &["Packages/com.b", "Packages/com.a", "Assets/Art/Models"])?;
        fs::write(project.join("Packages/manifest.json"), "{}")?;

        let candidates: Vec<PathBuf> =
            candidate_roots(&project, &ProjectLayout::default()).collect();

        let expected = vec![
            temp_dir.path().to_path_buf(),
            project.clone(),
            project.join("Packages/com.a"),
            project.join("Packages/com.b"),
            project.join("Assets"),
            project.join("Assets/Art"),
            project.join("Assets/Art/Models"),
        ];
        assert_eq!(candidates, expected);
        Ok(())
    }

    #[test]
    fn test_candidate_roots_without_packages_or_assets() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let project = temp_dir.path().join("Bare");
        fs::create_dir(&project)?;

        let candidates: Vec<PathBuf> =
            candidate_roots(&project, &ProjectLayout::default()).collect();

        assert_eq!(
            candidates,
            vec![
                temp_dir.path().to_path_buf(),
                project.clone(),
                project.join("Assets"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_custom_layout_names() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let project = temp_dir.path().join("proj");
        make_dirs(&project, &["vendor/lib", "content/levels"])?;
        let layout = ProjectLayout {
            packages_dir: "vendor".to_string(),
            assets_dir: "content".to_string(),
        };

        let candidates: Vec<PathBuf> = candidate_roots(&project, &layout).collect();

        assert!(candidates.contains(&project.join("vendor/lib")));
        assert!(candidates.contains(&project.join("content/levels")));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_not_followed() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        make_dirs(root, &["a/b"])?;
        std::os::unix::fs::symlink(root, root.join("a/b/loop"))?;
        std::os::unix::fs::symlink(root.join("a"), root.join("alias"))?;

        let walked: Vec<PathBuf> = transitive_subdirectories(root).collect();

        assert_eq!(walked, vec![root.join("a"), root.join("a/b")]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_outside_tree_is_walked() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let outside = temp_dir.path().join("outside");
        let root = temp_dir.path().join("root");
        make_dirs(&outside, &["inner"])?;
        fs::create_dir(&root)?;
        std::os::unix::fs::symlink(&outside, root.join("linked"))?;

        let walked: Vec<PathBuf> = transitive_subdirectories(&root).collect();

        assert_eq!(walked, vec![root.join("linked"), root.join("linked/inner")]);
        Ok(())
    }

    #[test]
    fn test_directory_removed_mid_walk_is_skipped() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        make_dirs(root, &["a/x", "b/inner", "c"])?;

        let mut walk = transitive_subdirectories(root);
        assert_eq!(walk.next(), Some(root.join("a")));

        fs::remove_dir_all(root.join("b"))?;
        let rest: Vec<PathBuf> = walk.collect();

        assert_eq!(rest, vec![root.join("a/x"), root.join("c")]);
        Ok(())
    }

    #[test]
    fn test_git_directories_are_not_descended() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        make_dirs(root, &["Lib/.git/objects/ab", "Lib/Runtime"])?;

        let walked: Vec<PathBuf> = transitive_subdirectories(root).collect();

        assert_eq!(walked, vec![root.join("Lib"), root.join("Lib/Runtime")]);
        Ok(())
    }

    #[test]
    fn test_list_child_dirs_skips_files() -> std::io::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        make_dirs(root, &["com.b/deep", "com.a"])?;
        fs::write(root.join("manifest.json"), "{}")?;

        assert_eq!(
            list_child_dirs(root),
            vec![root.join("com.a"), root.join("com.b")]
        );
        assert!(list_child_dirs(&root.join("missing")).is_empty());
        Ok(())
    }
}
