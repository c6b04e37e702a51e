use serde::{Deserialize, Serialize};

use super::store::SettingsStore;

pub const KEY_ALL_GAME_VERSIONS: &str = "all_game_versions";
pub const KEY_GAME_VERSION: &str = "game_version";
pub const KEY_AGREED: &str = "agreed";
pub const KEY_LAST_VIEW: &str = "last_view";

/// Version-related settings remembered between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedVersionState {
    /// Canonical snapshot of the last fetched version list.
    pub last_known_version_list: String,
    /// Version the user last selected. Empty when never chosen.
    pub selected_version: String,
    /// Version-dependent features stay locked until this is set.
    pub has_agreed_to_terms: bool,
}

impl PersistedVersionState {
    pub fn load(store: &dyn SettingsStore) -> Self {
        Self {
            last_known_version_list: store.get(KEY_ALL_GAME_VERSIONS).unwrap_or_default(),
            selected_version: store.get(KEY_GAME_VERSION).unwrap_or_default(),
            has_agreed_to_terms: store
                .get(KEY_AGREED)
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Stage every field into `store`. The caller flushes.
    pub fn write_to(&self, store: &mut dyn SettingsStore) {
        store.set(KEY_ALL_GAME_VERSIONS, self.last_known_version_list.clone());
        store.set(KEY_GAME_VERSION, self.selected_version.clone());
        store.set(KEY_AGREED, self.has_agreed_to_terms.to_string());
    }
}
