// ─── Version Reconciliation ───
// Pure decision logic: which game version the session should treat as
// selected, and whether the upstream version set changed since last run.

use serde::Serialize;

use super::list::VersionList;
use crate::core::state::PersistedVersionState;

/// Outcome of [`reconcile`].
///
/// `effective_version` is a member of the fetched list, or empty when the
/// list was empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    pub effective_version: String,
    /// The fetched set differs from the persisted snapshot. The caller stores
    /// the new snapshot and tells the user once.
    pub update_detected: bool,
}

impl ReconciliationResult {
    fn select(version: &str, update_detected: bool) -> Self {
        Self {
            effective_version: version.to_string(),
            update_detected,
        }
    }
}

/// Choose the effective version, in strict priority order:
///
/// 1. the locally installed version, when the API supports it;
/// 2. on any change of the version set (first run included), the latest entry
///    with `update_detected` raised;
/// 3. the user's previous selection, when still supported;
/// 4. the latest entry.
///
/// A change of the supported set is treated as a game update even when no new
/// game version was actually released.
pub fn reconcile(
    fetched: &VersionList,
    persisted: &PersistedVersionState,
    locally_detected: Option<&str>,
) -> ReconciliationResult {
    let Some(latest) = fetched.first() else {
        return ReconciliationResult::default();
    };

    if let Some(local) = locally_detected.filter(|v| !v.is_empty() && fetched.contains(v)) {
        return ReconciliationResult::select(local, false);
    }

    if fetched.canonical() != persisted.last_known_version_list {
        return ReconciliationResult::select(latest, true);
    }

    let selected = persisted.selected_version.as_str();
    if !selected.is_empty() && fetched.contains(selected) {
        return ReconciliationResult::select(selected, false);
    }

    ReconciliationResult::select(latest, false)
}
