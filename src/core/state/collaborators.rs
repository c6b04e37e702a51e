// Seams to the parts of the application this core only drives:
// the window layer and the mod list engine.

use serde::Serialize;

use super::session::View;
use crate::core::error::ShellResult;
use crate::core::version::VersionList;

/// Controls that can be enabled or disabled by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Navigation entry and install action of the mods list.
    ModsList,
    /// Game version selector.
    VersionPicker,
}

/// One-off messages shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The supported version set changed; the user should check the selection.
    GameUpdateDetected { selected: String },
    /// Versions could not be loaded; the mods list is unavailable.
    VersionsUnavailable { reason: String },
    /// Versions loaded, but the mods list stays locked until the terms are accepted.
    TermsNotAccepted,
    /// No game version could be selected.
    NoVersionAvailable,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::GameUpdateDetected { selected } => write!(
                f,
                "It looks like there's been a game update. Please double check that the correct version is selected ({selected})."
            ),
            Notice::VersionsUnavailable { reason } => write!(
                f,
                "Could not load game versions, the mods list will be unavailable.\n{reason}"
            ),
            Notice::TermsNotAccepted => {
                write!(f, "Read and accept the terms on the intro page to unlock the mods list.")
            }
            Notice::NoVersionAvailable => {
                write!(f, "No supported game version is available, the mods list is disabled.")
            }
        }
    }
}

/// Window layer as seen by the coordinator.
pub trait Presentation: Send {
    fn set_view_enabled(&mut self, feature: Feature, enabled: bool);
    fn set_active_content(&mut self, view: View);
    fn show_versions(&mut self, versions: &VersionList, selected: &str);
    fn notify(&mut self, notice: Notice);
}

/// Mod list engine. `load` refreshes the list and clears pending changes.
pub trait ModCatalog: Send {
    fn load(&mut self) -> ShellResult<()>;
    fn install(&mut self) -> ShellResult<()>;
    fn has_pending_changes(&self) -> bool;
}
