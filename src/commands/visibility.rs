//! `enable`, `disable` and `toggle`: the persisted toolbar visibility flag.
//!
//! The terminal stands in as the UI host. Attaching the toolbar registers a
//! render callback that prints the button row; detaching removes it.

use crate::core::{
    config::ToolbarConfig,
    dispatcher::Command,
    error::Result,
    host::{HostUi, IconHandle, RegionId, RenderCallback, ToolbarIcons, ToolbarLoader},
    print_info, print_success,
};
use colored::*;

const ICON_NAMES: [&str; 3] = ["Search", "Upload", "Sync"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    Enable,
    Disable,
    Toggle,
}

/// Terminal host: regions are rendered once, in registration order
#[derive(Default)]
pub struct TerminalHost {
    next_id: u64,
    regions: Vec<(RegionId, RenderCallback)>,
}

impl TerminalHost {
    pub fn render(&mut self) {
        for (_, render) in &mut self.regions {
            render();
        }
    }
}

impl HostUi for TerminalHost {
    fn register_toolbar_region(&mut self, render: RenderCallback) -> RegionId {
        self.next_id += 1;
        let id = RegionId(self.next_id);
        self.regions.push((id, render));
        id
    }

    fn unregister_toolbar_region(&mut self, region: RegionId) {
        self.regions.retain(|(id, _)| *id != region);
    }

    fn resolve_icon_resource(&self, name: &str) -> Option<IconHandle> {
        ICON_NAMES
            .iter()
            .any(|icon| *icon == name)
            .then(|| IconHandle(name.to_lowercase()))
    }
}

fn toolbar_row(icons: &ToolbarIcons) -> String {
    Command::ALL
        .iter()
        .map(|command| match icons.for_command(*command) {
            Some(icon) => format!(
                "{}{}",
                format!("({}) ", icon.0).bright_black(),
                command.as_str().blue()
            ),
            None => command.as_str().blue().to_string(),
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_toolbar(icons: ToolbarIcons) -> impl FnOnce() -> RenderCallback {
    move || {
        let row = toolbar_row(&icons);
        let render: RenderCallback = Box::new(move || println!("\n{row}\n"));
        render
    }
}

pub fn execute_visibility(change: VisibilityChange) -> Result<()> {
    let mut config = ToolbarConfig::load_or_create()?;
    let mut host = TerminalHost::default();
    let mut loader = ToolbarLoader::new();
    let icons = ToolbarIcons::resolve(&host, false);

    // Reflect the persisted state before changing it
    loader.update_visibility(&mut host, config.enabled, render_toolbar(icons.clone()));

    let enabled = match change {
        VisibilityChange::Enable => {
            config.enabled = true;
            loader.update_visibility(&mut host, true, render_toolbar(icons))
        }
        VisibilityChange::Disable => {
            config.enabled = false;
            loader.update_visibility(&mut host, false, render_toolbar(icons))
        }
        VisibilityChange::Toggle => {
            loader.toggle_enabled(&mut host, &mut config, render_toolbar(icons))
        }
    };
    config.save()?;

    if enabled {
        print_success("Toolbar enabled");
        host.render();
    } else {
        print_success("Toolbar disabled");
        print_info("Run 'repo-toolbar enable' to show it again.");
    }

    Ok(())
}
