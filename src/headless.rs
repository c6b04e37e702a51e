// Collaborators for running the shell without a window: every UI call is
// logged, the mod engine only records what it was asked to do.

use tracing::info;

use crate::core::error::ShellResult;
use crate::core::state::{Feature, ModCatalog, Notice, Presentation, View};
use crate::core::version::VersionList;

#[derive(Debug, Default)]
pub struct LogPresentation;

impl Presentation for LogPresentation {
    fn set_view_enabled(&mut self, feature: Feature, enabled: bool) {
        info!("[ui] {:?} enabled={}", feature, enabled);
    }

    fn set_active_content(&mut self, view: View) {
        info!("[ui] showing {}", view);
    }

    fn show_versions(&mut self, versions: &VersionList, selected: &str) {
        info!(
            "[ui] versions: {} (selected {:?})",
            versions.canonical(),
            selected
        );
    }

    fn notify(&mut self, notice: Notice) {
        info!("[ui] {}", notice);
    }
}

#[derive(Debug, Default)]
pub struct LogCatalog {
    loads: usize,
}

impl ModCatalog for LogCatalog {
    fn load(&mut self) -> ShellResult<()> {
        self.loads += 1;
        info!("[mods] load requested (#{})", self.loads);
        Ok(())
    }

    fn install(&mut self) -> ShellResult<()> {
        info!("[mods] install requested");
        Ok(())
    }

    fn has_pending_changes(&self) -> bool {
        false
    }
}
