//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ToolbarError`] which covers every failure the discovery
//! engine and the dispatcher can surface. It uses `thiserror` for ergonomic error
//! definitions and includes constructors for the common failure scenarios.
//!
//! # Public API
//! - [`ToolbarError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ToolbarError>`
//!
//! # Error Categories
//! - **Discovery**: Missing project directory, service lifecycle misuse
//! - **Cache and config**: Directory resolution, read/write/parse failures
//! - **Selection**: Nothing selected, index out of range
//! - **Dispatch**: Unsafe path arguments, missing or unlaunchable executable

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for repo-toolbar
#[derive(Error, Debug)]
pub enum ToolbarError {
    // Discovery errors
    #[error("Project directory does not exist: {path}")]
    ProjectDirNotFound { path: PathBuf },

    #[error("Discovery service has not been initialized")]
    NotInitialized,

    #[error("Discovery service has been disposed")]
    ServiceDisposed,

    // File operation errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Config errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Cache errors
    #[error("Could not find cache directory")]
    CacheDirectoryNotFound,

    #[error("Failed to create cache directory '{path}': {source}")]
    CacheDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read cache file '{path}': {source}")]
    CacheReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write cache file '{path}': {source}")]
    CacheWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Selection errors
    #[error("No repository selected. Run 'repo-toolbar select <index>' first.")]
    NothingSelected,

    #[error("Index {index} is out of range (1-{max} available)")]
    SelectionOutOfRange { index: usize, max: usize },

    // Dispatch errors
    #[error("Unknown command: '{name}'. Use one of: log, commit, fetch, push")]
    UnknownCommand { name: String },

    #[error("Refusing to pass path as an argument ({reason}): {path}")]
    UnsafePathArgument { path: String, reason: &'static str },

    #[error("Executable not found: {program}. Check the configured executable path.")]
    ExecutableNotFound { program: PathBuf },

    #[error("Failed to launch '{program}': {source}")]
    LaunchFailed {
        program: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using ToolbarError
pub type Result<T> = std::result::Result<T, ToolbarError>;

impl ToolbarError {
    /// Create a project directory not found error
    pub fn project_dir_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ProjectDirNotFound { path: path.into() }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache directory creation failed error
    pub fn cache_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CacheDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache read failed error
    pub fn cache_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache write failed error
    pub fn cache_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a selection out of range error
    pub fn selection_out_of_range(index: usize, max: usize) -> Self {
        Self::SelectionOutOfRange { index, max }
    }

    /// Create an unknown command error
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    /// Create an unsafe path argument error
    pub fn unsafe_path_argument(path: impl Into<String>, reason: &'static str) -> Self {
        Self::UnsafePathArgument {
            path: path.into(),
            reason,
        }
    }

    /// Create an executable not found error
    pub fn executable_not_found(program: impl Into<PathBuf>) -> Self {
        Self::ExecutableNotFound {
            program: program.into(),
        }
    }

    /// Create a launch failed error
    pub fn launch_failed(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LaunchFailed {
            program: program.into(),
            source,
        }
    }

    /// Whether this error means the external tool never started
    pub fn is_launch_failure(&self) -> bool {
        matches!(
            self,
            Self::ExecutableNotFound { .. } | Self::LaunchFailed { .. }
        )
    }
}
