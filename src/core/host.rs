//! Contract with the UI that embeds the toolbar.
//!
//! The engine never renders anything. A host implements [`HostUi`] to accept a
//! render callback for its toolbar area and to resolve icon resources by name;
//! [`ToolbarLoader`] attaches or detaches that callback according to the
//! persisted enable flag.

use crate::core::config::ToolbarConfig;
use crate::core::dispatcher::Command;

pub type RenderCallback = Box<dyn FnMut() + Send>;

/// Identifies a registered toolbar region so it can be removed again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub u64);

/// Opaque handle for an icon owned by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconHandle(pub String);

pub trait HostUi {
    fn register_toolbar_region(&mut self, render: RenderCallback) -> RegionId;
    fn unregister_toolbar_region(&mut self, region: RegionId);
    fn resolve_icon_resource(&self, name: &str) -> Option<IconHandle>;
}

/// Keeps at most one render callback attached to a host
#[derive(Debug, Default)]
pub struct ToolbarLoader {
    region: Option<RegionId>,
}

impl ToolbarLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.region.is_some()
    }

    /// Attaches when `enabled` and detached, detaches when disabled and attached.
    /// `make_render` is only called when a callback is actually registered.
    pub fn update_visibility<H: HostUi>(
        &mut self,
        host: &mut H,
        enabled: bool,
        make_render: impl FnOnce() -> RenderCallback,
    ) -> bool {
        match (enabled, self.region) {
            (true, None) => {
                let region = host.register_toolbar_region(make_render());
                log::debug!("Attached toolbar region {region:?}");
                self.region = Some(region);
            }
            (false, Some(region)) => {
                host.unregister_toolbar_region(region);
                log::debug!("Detached toolbar region {region:?}");
                self.region = None;
            }
            _ => {}
        }
        self.is_attached()
    }

    /// Flips the enable flag on `config` and applies it. The caller persists the config.
    pub fn toggle_enabled<H: HostUi>(
        &mut self,
        host: &mut H,
        config: &mut ToolbarConfig,
        make_render: impl FnOnce() -> RenderCallback,
    ) -> bool {
        config.enabled = !config.enabled;
        self.update_visibility(host, config.enabled, make_render);
        config.enabled
    }
}

/// Icons for the toolbar buttons, resolved once per host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarIcons {
    pub log: Option<IconHandle>,
    pub commit: Option<IconHandle>,
    pub fetch: Option<IconHandle>,
}

impl ToolbarIcons {
    /// Dark host skins use the `_Light` icon variants
    pub fn icon_name(base: &str, dark_skin: bool) -> String {
        if dark_skin {
            format!("{base}_Light")
        } else {
            base.to_string()
        }
    }

    pub fn base_name(command: Command) -> Option<&'static str> {
        match command {
            Command::Log => Some("Search"),
            Command::Commit => Some("Upload"),
            Command::Fetch => Some("Sync"),
            Command::Push | Command::None => None,
        }
    }

    pub fn resolve<H: HostUi>(host: &H, dark_skin: bool) -> Self {
        let resolve = |command| {
            let base = Self::base_name(command)?;
            let name = Self::icon_name(base, dark_skin);
            let icon = host.resolve_icon_resource(&name);
            if icon.is_none() {
                log::warn!("Host has no icon named '{name}'");
            }
            icon
        };

        Self {
            log: resolve(Command::Log),
            commit: resolve(Command::Commit),
            fetch: resolve(Command::Fetch),
        }
    }

    pub fn for_command(&self, command: Command) -> Option<&IconHandle> {
        match command {
            Command::Log => self.log.as_ref(),
            Command::Commit => self.commit.as_ref(),
            Command::Fetch => self.fetch.as_ref(),
            Command::Push | Command::None => None,
        }
    }
}
