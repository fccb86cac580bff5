//! Repository discovery service.
//!
//! [`DiscoveryService`] ties the walker, the `.git` predicate and the
//! [`RepositoryCache`] together behind one `scan(force_refresh)` call. It is an
//! explicitly constructed, owned object with an `init()`/`dispose()` lifecycle;
//! hosts create one per project session instead of relying on global state.
//!
//! # Public API
//! - [`DiscoveryService`]: `init`, `scan`, `refresh`, `list_entries`, `dispose`
//! - [`DisplayEntry`]: One row of the list a host shows, sentinels included
//! - [`list_for_display`]: Appends the rescan sentinel to a repository list
//! - [`walk_repositories`]: The uncached walk + filter step
//!
//! # Concurrency
//! The walk and the store run under one mutex, so a shared service never has two
//! scans in flight and readers never see a half-built list.

use crate::core::cache::{KeyValueStore, RepositoryCache};
use crate::core::error::{Result, ToolbarError};
use crate::core::predicate::is_repository;
use crate::core::walker::{candidate_roots, ProjectLayout};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Label of the placeholder row shown when nothing was found
pub const NO_REPOSITORIES_LABEL: &str = "No repos!";

/// Label of the trailing row that triggers a forced rescan
pub const RESCAN_LABEL: &str = "Scan for repositories...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEntry {
    Repository(PathBuf),
    NoRepositories,
    Rescan,
}

impl DisplayEntry {
    pub fn repository_path(&self) -> Option<&Path> {
        match self {
            Self::Repository(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_rescan(&self) -> bool {
        matches!(self, Self::Rescan)
    }
}

impl fmt::Display for DisplayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repository(path) => write!(f, "{}", path.display()),
            Self::NoRepositories => f.write_str(NO_REPOSITORIES_LABEL),
            Self::Rescan => f.write_str(RESCAN_LABEL),
        }
    }
}

/// Repository rows followed by the rescan row; a placeholder row stands in for an empty list.
pub fn list_for_display(list: &[PathBuf]) -> Vec<DisplayEntry> {
    let mut entries: Vec<DisplayEntry> = if list.is_empty() {
        vec![DisplayEntry::NoRepositories]
    } else {
        list.iter().cloned().map(DisplayEntry::Repository).collect()
    };
    entries.push(DisplayEntry::Rescan);
    entries
}

/// Length of the displayed list for `list`, sentinel rows included
pub fn displayed_len(list: &[PathBuf]) -> usize {
    list.len().max(1) + 1
}

/// Walks the candidate directories of `project_dir` and keeps the repository roots, in walk order.
pub fn walk_repositories(project_dir: &Path, layout: &ProjectLayout) -> Vec<PathBuf> {
    candidate_roots(project_dir, layout)
        .filter(|candidate| {
            let found = is_repository(candidate);
            if found {
                log::debug!("Found repository: {}", candidate.display());
            }
            found
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Ready,
    Disposed,
}

#[derive(Debug)]
struct Inner<S: KeyValueStore> {
    cache: RepositoryCache<S>,
    lifecycle: Lifecycle,
    repositories: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct DiscoveryService<S: KeyValueStore> {
    project_dir: PathBuf,
    layout: ProjectLayout,
    inner: Mutex<Inner<S>>,
}

impl<S: KeyValueStore> DiscoveryService<S> {
    /// Creates a service for `project_dir`. Relative paths are resolved against the current directory.
    pub fn new(project_dir: impl AsRef<Path>, layout: ProjectLayout, store: S) -> Result<Self> {
        let project_dir = project_dir.as_ref();
        let project_dir = if project_dir.is_absolute() {
            project_dir.to_path_buf()
        } else {
            std::env::current_dir()?.join(project_dir)
        };

        if !project_dir.is_dir() {
            return Err(ToolbarError::project_dir_not_found(project_dir));
        }

        Ok(Self {
            project_dir,
            layout,
            inner: Mutex::new(Inner {
                cache: RepositoryCache::new(store),
                lifecycle: Lifecycle::Created,
                repositories: Vec::new(),
            }),
        })
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Marks the service ready and loads the list, scanning only if nothing is cached.
    pub fn init(&self) -> Result<Vec<PathBuf>> {
        {
            let mut inner = self.lock();
            if inner.lifecycle == Lifecycle::Disposed {
                return Err(ToolbarError::ServiceDisposed);
            }
            inner.lifecycle = Lifecycle::Ready;
        }
        self.scan(false)
    }

    /// Drops in-memory state. The persisted cache is left in place for the next session.
    pub fn dispose(&self) {
        let mut inner = self.lock();
        inner.lifecycle = Lifecycle::Disposed;
        inner.repositories.clear();
        log::debug!("Discovery service for {} disposed", self.project_dir.display());
    }

    pub fn is_ready(&self) -> bool {
        self.lock().lifecycle == Lifecycle::Ready
    }

    /// Returns the cached list, or walks the project when forced or when no usable cache exists.
    pub fn scan(&self, force_refresh: bool) -> Result<Vec<PathBuf>> {
        let mut inner = self.lock();
        match inner.lifecycle {
            Lifecycle::Created => return Err(ToolbarError::NotInitialized),
            Lifecycle::Disposed => return Err(ToolbarError::ServiceDisposed),
            Lifecycle::Ready => {}
        }

        if !force_refresh {
            if let Some(cached) = inner.cache.load() {
                log::debug!("Using {} cached repositories", cached.len());
                inner.repositories = cached.clone();
                return Ok(cached);
            }
        }

        log::info!(
            "Scanning for repositories in {}",
            self.project_dir.display()
        );
        let found = walk_repositories(&self.project_dir, &self.layout);
        log::info!("Found {} repositories", found.len());

        inner.repositories = found.clone();
        inner.cache.store(&found).map_err(|e| {
            log::error!("Failed to persist repository list: {e}");
            e
        })?;

        Ok(found)
    }

    pub fn refresh(&self) -> Result<Vec<PathBuf>> {
        self.scan(true)
    }

    /// Current list, rebuilt from the cache on every call
    pub fn list_entries(&self) -> Result<Vec<PathBuf>> {
        self.scan(false)
    }

    pub fn display_entries(&self) -> Result<Vec<DisplayEntry>> {
        Ok(list_for_display(&self.list_entries()?))
    }

    /// Last list produced by this service, without touching the cache
    pub fn current(&self) -> Vec<PathBuf> {
        self.lock().repositories.clone()
    }

    /// Runs `f` against the backing store while holding the service lock
    pub fn with_store<T>(&self, f: impl FnOnce(&mut S) -> T) -> T {
        let mut inner = self.lock();
        f(inner.cache.store_mut())
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        // A panic mid-scan never persisted anything, so the state is still usable
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
