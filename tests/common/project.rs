//! Temporary game projects with embedded repositories

#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A project at `<temp>/Game` plus isolated config and cache homes.
/// The TempDir must be kept alive for the duration of the test.
pub struct TestProject {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestProject {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("Game");
        fs::create_dir_all(&root)?;
        fs::create_dir_all(temp_dir.path().join("home"))?;

        Ok(Self { temp_dir, root })
    }

    /// Project with a package repository and a nested asset repository
    pub fn with_two_repositories() -> anyhow::Result<Self> {
        let project = Self::new()?;
        project.add_repository("Packages/com.studio.net")?;
        project.add_repository("Assets/Plugins/Audio")?;
        project.add_dir("Assets/Scenes")?;
        Ok(project)
    }

    /// `rel` below the project root, `/`-separated
    pub fn path(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    pub fn add_dir(&self, rel: &str) -> anyhow::Result<PathBuf> {
        let dir = self.path(rel);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Creates `rel` with an empty `.git` directory in it
    pub fn add_repository(&self, rel: &str) -> anyhow::Result<PathBuf> {
        let repo = self.add_dir(rel)?;
        fs::create_dir_all(repo.join(".git"))?;
        Ok(repo)
    }

    fn home(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    pub fn config_file(&self) -> PathBuf {
        self.home()
            .join("config")
            .join("repo-toolbar")
            .join("config.json")
    }

    /// The binary, isolated from the real environment and pointed at this project
    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("repo-toolbar")?;
        cmd.env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.home().join("config"))
            .env("XDG_CACHE_HOME", self.home().join("cache"))
            .env("NO_COLOR", "1")
            .env_remove("REPO_TOOLBAR_EXECUTABLE")
            .arg("--project")
            .arg(&self.root);
        Ok(cmd)
    }

    /// Like [`command`](Self::command) with the external tool replaced by `executable`
    pub fn command_with_executable(&self, executable: &Path) -> anyhow::Result<Command> {
        let mut cmd = self.command()?;
        cmd.env("REPO_TOOLBAR_EXECUTABLE", executable);
        Ok(cmd)
    }
}
