//! Repo Toolbar - discovers the Git repositories embedded in a game project and
//! hands common VCS commands for the selected one to an external GUI tool.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Repository discovery with a persisted, per-project cache
//! - Selection tracking over the displayed list, including the rescan row
//! - Command dispatch to the configured executable
//! - The contract a UI host implements to show the toolbar

pub mod commands;
pub mod core;

pub use core::{
    // Dispatch
    Command,
    CommandDispatcher,
    // Discovery
    DiscoveryService,
    DisplayEntry,
    // Persistence
    FileStore,
    // Host integration
    HostUi,
    KeyValueStore,
    MemoryStore,
    ProjectLayout,
    // Error handling
    Result,
    // Selection
    SelectionOutcome,
    SelectionState,
    ToolbarConfig,
    ToolbarError,
    ToolbarLoader,
};
