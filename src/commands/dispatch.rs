use crate::commands::session::{display_index, ProjectSession};
use crate::core::{
    dispatcher::{Command, CommandDispatcher},
    error::{Result, ToolbarError},
    print_success,
    selection::SelectionState,
};
use std::path::PathBuf;

/// Hands `command` for the current row, or the row at the 1-based `position`, to the configured executable.
///
/// An explicit position is a one-off target and does not change the saved selection.
pub fn execute_dispatch(
    project: Option<PathBuf>,
    command: Command,
    position: Option<usize>,
) -> Result<()> {
    let session = ProjectSession::open(project)?;
    let (displayed, saved) = session.displayed()?;

    let target = match position {
        Some(position) => {
            let mut target = SelectionState::new();
            target.select(display_index(position, &displayed)?, &displayed);
            target
        }
        None => saved,
    };

    let request = target
        .dispatch_request(command, &displayed)
        .ok_or(ToolbarError::NothingSelected)?;

    let dispatcher = CommandDispatcher::new(session.config.effective_executable());
    if let Some(pid) = dispatcher.dispatch(&request)? {
        print_success(&format!(
            "Started {command} for {} (pid {pid})",
            request.path().display()
        ));
    }

    Ok(())
}
