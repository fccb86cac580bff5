//! Shared setup for commands that work on a project's repository list.
//!
//! Every project command follows the same steps:
//! 1. **Project resolution**: `--project` or the current directory, made absolute
//! 2. **Config loading**: Executable, layout and visibility from the config file
//! 3. **Discovery**: A service over the per-project store, initialized so the cached list is loaded
//! 4. **Selection restore**: The selection saved by the previous invocation

use crate::core::{
    cache::FileStore,
    config::ToolbarConfig,
    discovery::{DiscoveryService, DisplayEntry},
    error::{Result, ToolbarError},
    selection::SelectionState,
    state::{restore_selection, SessionState},
};
use std::env;
use std::path::{Path, PathBuf};

pub struct ProjectSession {
    pub config: ToolbarConfig,
    pub service: DiscoveryService<FileStore>,
}

impl ProjectSession {
    pub fn open(project: Option<PathBuf>) -> Result<Self> {
        let project_dir = resolve_project_dir(project)?;
        if !project_dir.is_dir() {
            return Err(ToolbarError::project_dir_not_found(project_dir));
        }

        let config = ToolbarConfig::load_or_create()?;
        let store = FileStore::for_project(&project_dir)?;
        log::debug!("Using store {}", store.path().display());

        let service = DiscoveryService::new(&project_dir, config.layout.clone(), store)?;
        service.init()?;

        Ok(Self { config, service })
    }

    pub fn project_dir(&self) -> &Path {
        self.service.project_dir()
    }

    /// The displayed list together with the selection saved for it
    pub fn displayed(&self) -> Result<(Vec<DisplayEntry>, SelectionState)> {
        let displayed = self.service.display_entries()?;
        let selection = self
            .service
            .with_store(|store| restore_selection(store, displayed.len()));
        Ok((displayed, selection))
    }

    pub fn save_selection(&self, selection: &SelectionState) -> Result<()> {
        let displayed_len = self.service.display_entries()?.len();
        let state = SessionState::new(selection, displayed_len);
        self.service.with_store(|store| state.save(store))
    }
}

fn resolve_project_dir(project: Option<PathBuf>) -> Result<PathBuf> {
    let current_dir = env::current_dir()?;
    let path = match project {
        Some(path) => current_dir.join(path),
        None => current_dir,
    };
    // Trailing separators and `.` segments must not change the cache key
    Ok(path.components().collect())
}

/// Converts a 1-based display position into an index into `displayed`
pub fn display_index(position: usize, displayed: &[DisplayEntry]) -> Result<usize> {
    if position == 0 || position > displayed.len() {
        return Err(ToolbarError::selection_out_of_range(
            position,
            displayed.len(),
        ));
    }
    Ok(position - 1)
}
