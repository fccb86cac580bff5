//! Current-entry tracking over the displayed repository list.
//!
//! The displayed list is the repository list plus a trailing rescan row (or a
//! placeholder row and the rescan row when nothing was found). Picking the rescan
//! row is a command, not a choice: it forces one rescan and resets the selection
//! to the first row.
//!
//! The state machine has two phases, [`SelectionPhase::Idle`] and
//! [`SelectionPhase::RescanRequested`]; the second only lasts until the forced
//! scan has been issued.

use crate::core::cache::KeyValueStore;
use crate::core::discovery::{displayed_len, DiscoveryService, DisplayEntry};
use crate::core::dispatcher::{Command, DispatchRequest};
use crate::core::error::Result;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    #[default]
    Idle,
    RescanRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// A repository row is now current
    Selected(PathBuf),
    /// The "no repositories" row is current; nothing can be dispatched
    Placeholder,
    /// The rescan row was picked; the list was rebuilt and index 0 is current
    Rescanned { repositories: Vec<PathBuf> },
    /// Index beyond the displayed list; the selection did not change
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    index: usize,
    phase: SelectionPhase,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a previously persisted index, dropping it if it no longer fits
    pub fn restore(index: usize, displayed_len: usize) -> Self {
        let index = if index < displayed_len { index } else { 0 };
        Self {
            index,
            phase: SelectionPhase::Idle,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn is_rescan_choice(index: usize, displayed: &[DisplayEntry]) -> bool {
        !displayed.is_empty() && index == displayed.len() - 1
    }

    /// Sets the current index. Out-of-range indices are ignored and return false.
    pub fn select(&mut self, index: usize, displayed: &[DisplayEntry]) -> bool {
        if index >= displayed.len() {
            log::debug!(
                "Ignoring selection {index}, only {} entries displayed",
                displayed.len()
            );
            return false;
        }

        self.index = index;
        self.phase = if Self::is_rescan_choice(index, displayed) {
            SelectionPhase::RescanRequested
        } else {
            SelectionPhase::Idle
        };
        true
    }

    pub fn on_list_changed(&mut self, new_displayed_len: usize) {
        log::debug!("Displayed list changed to {new_displayed_len} entries, resetting selection");
        self.index = 0;
    }

    /// Issues the forced scan for a pending rescan request and returns to idle.
    pub fn complete_rescan<S: KeyValueStore>(
        &mut self,
        service: &DiscoveryService<S>,
    ) -> Result<Option<Vec<PathBuf>>> {
        if self.phase != SelectionPhase::RescanRequested {
            return Ok(None);
        }

        // Back to idle even if the scan fails, so the next pick is not swallowed
        self.phase = SelectionPhase::Idle;
        let repositories = service.refresh();
        self.on_list_changed(repositories.as_deref().map_or(0, displayed_len));
        Ok(Some(repositories?))
    }

    /// Selects `index` in the service's current display list and acts on it.
    pub fn choose<S: KeyValueStore>(
        &mut self,
        index: usize,
        service: &DiscoveryService<S>,
    ) -> Result<SelectionOutcome> {
        let displayed = service.display_entries()?;

        if !self.select(index, &displayed) {
            return Ok(SelectionOutcome::Ignored);
        }

        if let Some(repositories) = self.complete_rescan(service)? {
            return Ok(SelectionOutcome::Rescanned { repositories });
        }

        Ok(match &displayed[index] {
            DisplayEntry::Repository(path) => SelectionOutcome::Selected(path.clone()),
            _ => SelectionOutcome::Placeholder,
        })
    }

    pub fn selected_entry<'a>(&self, displayed: &'a [DisplayEntry]) -> Option<&'a DisplayEntry> {
        displayed.get(self.index)
    }

    /// Binds `command` to the current row, if that row is a repository.
    pub fn dispatch_request(
        &self,
        command: Command,
        displayed: &[DisplayEntry],
    ) -> Option<DispatchRequest> {
        if command == Command::None {
            return None;
        }
        self.selected_entry(displayed)
            .and_then(DisplayEntry::repository_path)
            .map(|path| DispatchRequest::new(command, path))
    }
}
