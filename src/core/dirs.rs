use crate::core::error::{Result, ToolbarError};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "repo-toolbar";

pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| dirs::home_dir().map(|home| home.join(".config")).ok_or(()))
            .map_err(|_| ToolbarError::ConfigDirectoryNotFound)?,
        "macos" => dirs::home_dir()
            .ok_or(ToolbarError::ConfigDirectoryNotFound)?
            .join("Library/Application Support"),
        _ => dirs::config_dir().ok_or(ToolbarError::ConfigDirectoryNotFound)?,
    };

    Ok(base.join(APP_DIR))
}

pub fn get_cache_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .or_else(|_| dirs::home_dir().map(|home| home.join(".cache")).ok_or(()))
            .map_err(|_| ToolbarError::CacheDirectoryNotFound)?,
        "macos" => dirs::home_dir()
            .ok_or(ToolbarError::CacheDirectoryNotFound)?
            .join("Library/Caches"),
        _ => dirs::cache_dir().ok_or(ToolbarError::CacheDirectoryNotFound)?,
    };

    Ok(base.join(APP_DIR))
}

/// Per-project cache directory, keyed by a hash of the project path
pub fn get_project_cache_directory(project_dir: &Path) -> Result<PathBuf> {
    let project_hash = format!("{:x}", md5::compute(project_dir.to_string_lossy().as_bytes()));
    log::debug!("project cache key for {}: {project_hash}", project_dir.display());
    Ok(get_cache_directory()?.join(project_hash))
}
