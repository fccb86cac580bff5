//! Selection state persisted between host sessions.
//!
//! A CLI invocation is a short-lived host session, so the current selection is
//! written to the project's store after every change and restored on the next
//! run. The stored displayed-list length lets a restore notice that the list
//! changed size in between and fall back to the first entry.

use crate::core::cache::KeyValueStore;
use crate::core::error::Result;
use crate::core::selection::SelectionState;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Key the session state is stored under, next to the repository list
pub const SELECTION_KEY: &str = "selection";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub selected_index: usize,
    pub displayed_len: usize,
    pub last_updated: SystemTime,
}

impl SessionState {
    pub fn new(selection: &SelectionState, displayed_len: usize) -> Self {
        Self {
            selected_index: selection.index(),
            displayed_len,
            last_updated: SystemTime::now(),
        }
    }

    pub fn load<S: KeyValueStore>(store: &S) -> Option<Self> {
        let raw = match store.get(SELECTION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Failed to read selection state: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                log::warn!("Discarding unreadable selection state: {e}");
                None
            }
        }
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
        let json = serde_json::to_string(self)?;
        store.set(SELECTION_KEY, &json)
    }

    /// Selection for a list that is now `displayed_len` long
    pub fn into_selection(self, displayed_len: usize) -> SelectionState {
        if self.displayed_len != displayed_len {
            log::debug!(
                "Displayed list changed size ({} -> {displayed_len}), selecting first entry",
                self.displayed_len
            );
            return SelectionState::new();
        }
        SelectionState::restore(self.selected_index, displayed_len)
    }
}

/// Restores the selection for a list of `displayed_len` rows, defaulting to the first row
pub fn restore_selection<S: KeyValueStore>(store: &S, displayed_len: usize) -> SelectionState {
    SessionState::load(store)
        .map(|state| state.into_selection(displayed_len))
        .unwrap_or_default()
}
