use crate::commands::list::{print_display_list, repository_count};
use crate::commands::session::{display_index, ProjectSession};
use crate::core::{
    error::Result, print_info, print_success, selection::SelectionOutcome,
};
use std::path::PathBuf;

/// Makes the row at the 1-based `position` current. The last row rescans instead.
pub fn execute_select(project: Option<PathBuf>, position: usize) -> Result<()> {
    let session = ProjectSession::open(project)?;
    let (displayed, mut selection) = session.displayed()?;
    let index = display_index(position, &displayed)?;

    match selection.choose(index, &session.service)? {
        SelectionOutcome::Selected(path) => {
            session.save_selection(&selection)?;
            print_success(&format!("Selected {}", path.display()));
        }
        SelectionOutcome::Placeholder => {
            session.save_selection(&selection)?;
            print_info("No repositories found. Select the last entry to scan again.");
        }
        SelectionOutcome::Rescanned { repositories } => {
            session.save_selection(&selection)?;
            print_success(&format!(
                "Rescanned, found {}",
                repository_count(repositories.len())
            ));
            let displayed = session.service.display_entries()?;
            print_display_list(&session, &displayed, &selection);
        }
        SelectionOutcome::Ignored => {
            // display_index already rejected anything out of range
            log::warn!("Selection of {position} ignored");
        }
    }

    Ok(())
}
