use crate::commands::session::ProjectSession;
use crate::core::{
    discovery::DisplayEntry, error::Result, print_entry, print_section_header, print_success,
    selection::SelectionState,
};
use std::path::PathBuf;

pub fn execute_list(project: Option<PathBuf>) -> Result<()> {
    let session = ProjectSession::open(project)?;
    let (displayed, selection) = session.displayed()?;

    print_display_list(&session, &displayed, &selection);
    Ok(())
}

pub fn execute_scan(project: Option<PathBuf>, force: bool) -> Result<()> {
    let session = ProjectSession::open(project)?;
    let repositories = session.service.scan(force)?;

    let (displayed, mut selection) = session.displayed()?;
    if force {
        selection.on_list_changed(displayed.len());
        session.save_selection(&selection)?;
    }

    print_success(&format!("Found {}", repository_count(repositories.len())));
    print_display_list(&session, &displayed, &selection);
    Ok(())
}

pub(crate) fn repository_count(count: usize) -> String {
    let noun = if count == 1 { "repository" } else { "repositories" };
    format!("{count} {noun}")
}

pub(crate) fn print_display_list(
    session: &ProjectSession,
    displayed: &[DisplayEntry],
    selection: &SelectionState,
) {
    print_section_header(&format!("Repositories in {}", session.project_dir().display()));

    for (index, entry) in displayed.iter().enumerate() {
        let current = index == selection.index() && !entry.is_rescan();
        print_entry(index + 1, entry, current);
    }

    println!();
}
