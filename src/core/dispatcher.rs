//! Hand-off of a (command, repository) pair to the external VCS GUI.
//!
//! The external tool takes `/command:<name> /path:"<absolute-path>"`. Turning a
//! path into that argument is a separate encoding step: paths that cannot be
//! passed through this grammar safely (embedded quotes, line breaks, NUL, empty
//! or relative paths) are rejected before anything is launched.
//!
//! # Public API
//! - [`Command`]: Logical operations understood by the external tool
//! - [`DispatchRequest`]: A command bound to a selected repository
//! - [`ProcessInvocation`]: Program plus encoded arguments for both platforms
//! - [`ProcessLauncher`] / [`SystemLauncher`]: Fire-and-forget process start
//! - [`CommandDispatcher`]: `execute(command, path)`
//!
//! # Launch Semantics
//! The process is started detached with null stdio and no console window, and is
//! never waited on. Only failure to *start* is reported back.

use crate::core::error::{Result, ToolbarError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// No-op, never launched
    None,
    Commit,
    Log,
    Fetch,
    Push,
}

impl Command {
    /// Commands that actually launch the external tool
    pub const ALL: [Command; 4] = [Command::Log, Command::Commit, Command::Fetch, Command::Push];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::None => "none",
            Command::Commit => "commit",
            Command::Log => "log",
            Command::Fetch => "fetch",
            Command::Push => "push",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ToolbarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "commit" => Ok(Command::Commit),
            "log" => Ok(Command::Log),
            "fetch" => Ok(Command::Fetch),
            "push" => Ok(Command::Push),
            other => Err(ToolbarError::unknown_command(other)),
        }
    }
}

/// A command bound to a repository path picked from the displayed list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    command: Command,
    path: PathBuf,
}

impl DispatchRequest {
    /// Only selection code builds these, from a repository row
    pub(crate) fn new(command: Command, path: impl Into<PathBuf>) -> Self {
        Self {
            command,
            path: path.into(),
        }
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Validates `path` for use inside `/path:"..."` and returns its text.
pub fn encode_path_argument(path: &Path) -> Result<String> {
    let text = path
        .to_str()
        .ok_or_else(|| ToolbarError::unsafe_path_argument(path.to_string_lossy(), "not valid UTF-8"))?;

    let reason = if text.is_empty() {
        Some("empty path")
    } else if text.contains('"') {
        Some("embedded double quote")
    } else if text.contains('\0') {
        Some("embedded NUL byte")
    } else if text.contains(['\n', '\r']) {
        Some("embedded line break")
    } else if !path.is_absolute() {
        Some("relative path")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ToolbarError::unsafe_path_argument(text, reason)),
        None => Ok(text.to_string()),
    }
}

/// `/command:<name> /path:"<path>"`
pub fn build_arguments(command: Command, path: &Path) -> Result<String> {
    let encoded = encode_path_argument(path)?;
    Ok(format!("/command:{command} /path:\"{encoded}\""))
}

/// Everything needed to start the external tool once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInvocation {
    pub program: PathBuf,
    /// Raw command line, as handed to the process on Windows
    pub command_line: String,
    /// Argument vector used where processes receive argv directly
    pub args: Vec<String>,
}

impl ProcessInvocation {
    pub fn new(program: impl Into<PathBuf>, command: Command, path: &Path) -> Result<Self> {
        let encoded = encode_path_argument(path)?;
        Ok(Self {
            program: program.into(),
            command_line: build_arguments(command, path)?,
            args: vec![format!("/command:{command}"), format!("/path:{encoded}")],
        })
    }
}

pub trait ProcessLauncher {
    /// Starts the process without waiting on it, returning its id
    fn launch(&self, invocation: &ProcessInvocation) -> Result<u32>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, invocation: &ProcessInvocation) -> Result<u32> {
        let mut cmd = std::process::Command::new(&invocation.program);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            cmd.creation_flags(CREATE_NO_WINDOW);
            cmd.raw_arg(&invocation.command_line);
        }
        #[cfg(not(windows))]
        {
            cmd.args(&invocation.args);
        }

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ToolbarError::executable_not_found(&invocation.program),
            _ => ToolbarError::launch_failed(&invocation.program, e),
        })?;
        let pid = child.id();

        // Reap in the background so long-lived hosts don't collect zombies
        std::thread::spawn(move || {
            if let Err(e) = child.wait() {
                log::debug!("Lost track of launched process {pid}: {e}");
            }
        });

        Ok(pid)
    }
}

#[derive(Debug, Clone)]
pub struct CommandDispatcher<L: ProcessLauncher = SystemLauncher> {
    executable: PathBuf,
    launcher: L,
}

impl CommandDispatcher<SystemLauncher> {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self::with_launcher(executable, SystemLauncher)
    }
}

impl<L: ProcessLauncher> CommandDispatcher<L> {
    pub fn with_launcher(executable: impl Into<PathBuf>, launcher: L) -> Self {
        Self {
            executable: executable.into(),
            launcher,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Launches the external tool for `command` on `path`.
    ///
    /// Returns `Ok(None)` for [`Command::None`], `Ok(Some(pid))` once the process
    /// has started. The path is not checked for being a repository.
    pub fn execute(&self, command: Command, path: &Path) -> Result<Option<u32>> {
        if command == Command::None {
            log::debug!("Ignoring dispatch of the empty command");
            return Ok(None);
        }

        let invocation = ProcessInvocation::new(&self.executable, command, path)?;
        log::info!(
            "Launching {} {}",
            invocation.program.display(),
            invocation.command_line
        );

        match self.launcher.launch(&invocation) {
            Ok(pid) => Ok(Some(pid)),
            Err(e) => {
                log::error!("Dispatch of '{command}' failed: {e}");
                Err(e)
            }
        }
    }

    pub fn dispatch(&self, request: &DispatchRequest) -> Result<Option<u32>> {
        self.execute(request.command(), request.path())
    }
}
