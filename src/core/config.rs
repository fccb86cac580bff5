use crate::core::dirs::get_config_directory;
use crate::core::error::{Result, ToolbarError};
use crate::core::walker::ProjectLayout;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Overrides `executable` for the current process without persisting it
pub const EXECUTABLE_ENV: &str = "REPO_TOOLBAR_EXECUTABLE";

const CONFIG_FILE: &str = "config.json";

pub fn default_executable() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Program Files\TortoiseGit\bin\TortoiseGitProc.exe")
    } else {
        PathBuf::from("TortoiseGitProc")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToolbarConfig {
    /// External VCS GUI every command is handed to
    pub executable: PathBuf,
    /// Whether hosts should attach the toolbar
    pub enabled: bool,
    #[serde(default)]
    pub layout: ProjectLayout,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            enabled: false,
            layout: ProjectLayout::default(),
            created_at: chrono::Utc::now(),
        }
    }
}

impl ToolbarConfig {
    pub fn config_file() -> Result<PathBuf> {
        Ok(get_config_directory()?.join(CONFIG_FILE))
    }

    pub fn load_or_create() -> Result<Self> {
        let config_file = Self::config_file()?;

        if config_file.exists() {
            let content = std::fs::read_to_string(&config_file)?;
            serde_json::from_str(&content)
                .map_err(|e| ToolbarError::config_parse_failed(&config_file, e))
        } else {
            log::debug!("Creating default config at {}", config_file.display());
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// The executable to launch: [`EXECUTABLE_ENV`] when set, `executable` otherwise
    pub fn effective_executable(&self) -> PathBuf {
        Self::executable_override(std::env::var_os(EXECUTABLE_ENV))
            .unwrap_or_else(|| self.executable.clone())
    }

    fn executable_override(value: Option<std::ffi::OsString>) -> Option<PathBuf> {
        let value = value.filter(|value| !value.is_empty())?;
        log::debug!("Using executable from {EXECUTABLE_ENV}: {}", value.to_string_lossy());
        Some(PathBuf::from(value))
    }

    pub fn save(&self) -> Result<()> {
        let config_dir = get_config_directory()?;
        std::fs::create_dir_all(&config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_dir.join(CONFIG_FILE), content)?;

        Ok(())
    }

    pub fn set_executable(&mut self, executable: impl Into<PathBuf>) -> Result<()> {
        self.executable = executable.into();
        self.save()
    }
}
