use serde::{Deserialize, Serialize};

/// Mutually exclusive top-level screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Intro,
    #[serde(rename = "mods")]
    ModsList,
    About,
    Options,
}

impl View {
    pub const ALL: [View; 4] = [View::Intro, View::ModsList, View::About, View::Options];

    /// Identifier written to the settings store.
    pub fn as_key(self) -> &'static str {
        match self {
            View::Intro => "intro",
            View::ModsList => "mods",
            View::About => "about",
            View::Options => "options",
        }
    }

    /// Case-insensitive inverse of [`View::as_key`].
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|view| view.as_key().eq_ignore_ascii_case(key))
    }

    /// Views that require a known game version and accepted terms.
    pub fn is_version_dependent(self) -> bool {
        matches!(self, View::ModsList)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Per-process navigation state, owned by the coordinator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub active_view: View,
    /// The mod list has been loaded at least once this session.
    pub mods_list_loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_key(view.as_key()), Some(view));
        }
    }

    #[test]
    fn key_lookup_ignores_case_and_padding() {
        assert_eq!(View::from_key("Mods"), Some(View::ModsList));
        assert_eq!(View::from_key(" OPTIONS "), Some(View::Options));
        assert_eq!(View::from_key("Invalid"), None);
        assert_eq!(View::from_key(""), None);
    }

    #[test]
    fn serializes_with_store_keys() {
        assert_eq!(serde_json::to_string(&View::ModsList).unwrap(), "\"mods\"");
        assert_eq!(serde_json::to_string(&View::About).unwrap(), "\"about\"");
    }
}
