//! Core functionality for the repo-toolbar tool.
//!
//! This module provides repository discovery, the persisted repository list,
//! selection tracking and the hand-off of commands to the external VCS GUI.

pub mod cache;
pub mod config;
pub mod dirs;
pub mod discovery;
pub mod dispatcher;
pub mod error;
pub mod host;
pub mod output;
pub mod predicate;
pub mod selection;
pub mod state;
pub mod walker;

// === Error handling ===
pub use error::{Result, ToolbarError};

// === Discovery ===
// Walk the project, keep directories holding a `.git` entry, cache the result
pub use discovery::{list_for_display, DiscoveryService, DisplayEntry};
pub use predicate::is_repository;
pub use walker::{candidate_roots, ProjectLayout};

// === Persistence ===
pub use cache::{CacheRecord, FileStore, KeyValueStore, MemoryStore, RepositoryCache};
pub use config::ToolbarConfig;
pub use state::{restore_selection, SessionState};

// === Selection and dispatch ===
pub use dispatcher::{Command, CommandDispatcher, DispatchRequest, ProcessLauncher};
pub use selection::{SelectionOutcome, SelectionState};

// === Host integration ===
pub use host::{HostUi, ToolbarIcons, ToolbarLoader};

// === Output formatting ===
pub use output::{print_entry, print_error, print_info, print_section_header, print_success};
