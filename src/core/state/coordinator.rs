// ─── Session State Coordinator ───
// Owns the navigation state and the persisted version settings, and decides
// which version-dependent features are available.
//
// Not thread-safe by itself: it is owned by the single UI task (see
// `core::shell`), which serializes every mutation.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::collaborators::{Feature, ModCatalog, Notice, Presentation};
use super::persisted::{PersistedVersionState, KEY_LAST_VIEW};
use super::session::{SessionState, View};
use super::store::SettingsStore;
use crate::core::error::{FetchError, ShellError, ShellResult};
use crate::core::version::{reconcile, ReconciliationResult, VersionList};

/// Whether version-dependent features may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Versions not loaded yet.
    Pending,
    Enabled,
    Disabled,
}

/// Read-only view of the coordinator, handed out across tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub session: SessionState,
    pub effective_version: String,
    pub versions: VersionList,
    pub mods_availability: Availability,
    pub persisted: PersistedVersionState,
}

pub struct SessionStateCoordinator {
    presentation: Box<dyn Presentation>,
    store: Box<dyn SettingsStore>,
    mods: Box<dyn ModCatalog>,
    persisted: PersistedVersionState,
    session: SessionState,
    versions: VersionList,
    effective_version: String,
    mods_availability: Availability,
    /// The version load failed; only a restart unlocks the mods list.
    load_failed: bool,
    /// Explanations already shown for a locked mods list.
    shown_notices: HashSet<&'static str>,
}

impl SessionStateCoordinator {
    pub fn new(
        presentation: Box<dyn Presentation>,
        store: Box<dyn SettingsStore>,
        mods: Box<dyn ModCatalog>,
    ) -> Self {
        let persisted = PersistedVersionState::load(store.as_ref());
        debug!(
            "Loaded persisted version state: selected={:?}, agreed={}",
            persisted.selected_version, persisted.has_agreed_to_terms
        );

        let mut coordinator = Self {
            presentation,
            store,
            mods,
            persisted,
            session: SessionState::default(),
            versions: VersionList::default(),
            effective_version: String::new(),
            mods_availability: Availability::Pending,
            load_failed: false,
            shown_notices: HashSet::new(),
        };
        // Locked until the version load has been reconciled.
        coordinator
            .presentation
            .set_view_enabled(Feature::ModsList, false);
        coordinator
    }

    // ── Accessors ───────────────────────────────────────

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn persisted(&self) -> &PersistedVersionState {
        &self.persisted
    }

    pub fn effective_version(&self) -> &str {
        &self.effective_version
    }

    pub fn mods_availability(&self) -> Availability {
        self.mods_availability
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session: self.session.clone(),
            effective_version: self.effective_version.clone(),
            versions: self.versions.clone(),
            mods_availability: self.mods_availability,
            persisted: self.persisted.clone(),
        }
    }

    // ── Navigation ──────────────────────────────────────

    /// Show the view remembered from the previous run. Called once at startup.
    ///
    /// Unknown or missing identifiers fall back to the intro, as does any view
    /// while the terms have not been accepted.
    pub fn restore_last_view(&mut self) -> ShellResult<View> {
        let stored = self.store.get(KEY_LAST_VIEW);
        let view = match stored.as_deref().map(|key| (key, View::from_key(key))) {
            Some((_, Some(view))) if self.persisted.has_agreed_to_terms => view,
            Some((_, Some(view))) => {
                debug!("Terms not accepted, not restoring {}", view);
                View::Intro
            }
            Some((key, None)) => {
                warn!("Unknown last view {:?}, showing intro", key);
                View::Intro
            }
            None => View::Intro,
        };

        info!("Restoring last view: {}", view);
        self.show(view);
        if view == View::ModsList {
            self.load_mods()?;
        }
        Ok(view)
    }

    /// Switch to `view` and remember it.
    ///
    /// The mods list is loaded on its first visit and reloaded only when the
    /// catalog reports pending changes.
    pub fn navigate(&mut self, view: View) -> ShellResult<()> {
        if view.is_version_dependent() && self.mods_availability != Availability::Enabled {
            warn!(
                "Refusing navigation to {} while mods are {:?}",
                view, self.mods_availability
            );
            return Err(ShellError::ViewUnavailable(view));
        }

        self.show(view);
        self.store.set(KEY_LAST_VIEW, view.as_key().to_string());
        self.store.save()?;

        if view == View::ModsList {
            if !self.session.mods_list_loaded {
                self.load_mods()?;
            } else if self.mods.has_pending_changes() {
                debug!("Mod catalog has pending changes, reloading");
                self.load_mods()?;
            } else {
                debug!("Reusing loaded mod list");
            }
        }
        Ok(())
    }

    fn show(&mut self, view: View) {
        self.session.active_view = view;
        self.presentation.set_active_content(view);
    }

    fn load_mods(&mut self) -> ShellResult<()> {
        self.mods.load()?;
        self.session.mods_list_loaded = true;
        Ok(())
    }

    // ── Version load ────────────────────────────────────

    /// Reconcile a freshly fetched list and apply the outcome.
    pub fn on_versions_fetched(
        &mut self,
        fetched: VersionList,
        locally_detected: Option<&str>,
    ) -> ShellResult<ReconciliationResult> {
        let result = reconcile(&fetched, &self.persisted, locally_detected);
        if result.update_detected {
            info!(
                "Supported version set changed: {:?} -> {:?}",
                self.persisted.last_known_version_list,
                fetched.canonical()
            );
            self.persisted.last_known_version_list = fetched.canonical();
        }
        self.versions = fetched;
        self.on_reconciliation(&result)?;
        Ok(result)
    }

    /// Record the effective version, flush, then unlock the mods list when a
    /// version is known and the terms are accepted.
    ///
    /// A failed flush counts as a failed load: version-dependent features are
    /// locked and the persistence error is returned.
    pub fn on_reconciliation(&mut self, result: &ReconciliationResult) -> ShellResult<()> {
        info!(
            "Effective game version: {:?} (update detected: {})",
            result.effective_version, result.update_detected
        );

        self.effective_version = result.effective_version.clone();
        if !self.effective_version.is_empty() {
            self.persisted.selected_version = self.effective_version.clone();
        }

        self.presentation
            .show_versions(&self.versions, &self.effective_version);
        self.presentation
            .set_view_enabled(Feature::VersionPicker, !self.versions.is_empty());

        if result.update_detected {
            self.presentation.notify(Notice::GameUpdateDetected {
                selected: self.effective_version.clone(),
            });
        }

        if let Err(e) = self.persist() {
            warn!("Could not persist version state: {}", e);
            self.lock_version_features(e.to_string());
            return Err(e);
        }
        self.apply_gating();
        Ok(())
    }

    /// Versions could not be loaded: lock everything version-dependent.
    pub fn on_fetch_failed(&mut self, err: &FetchError) {
        warn!("Game versions unavailable: {}", err);
        self.lock_version_features(err.to_string());
    }

    fn lock_version_features(&mut self, reason: String) {
        self.load_failed = true;
        self.mods_availability = Availability::Disabled;
        self.presentation
            .set_view_enabled(Feature::VersionPicker, false);
        self.presentation.set_view_enabled(Feature::ModsList, false);
        self.notify_once(Notice::VersionsUnavailable { reason });
    }

    fn apply_gating(&mut self) {
        let enabled = !self.effective_version.is_empty() && self.persisted.has_agreed_to_terms;
        self.mods_availability = if enabled {
            Availability::Enabled
        } else {
            Availability::Disabled
        };
        self.presentation.set_view_enabled(Feature::ModsList, enabled);

        if !enabled {
            let notice = if self.effective_version.is_empty() {
                Notice::NoVersionAvailable
            } else {
                Notice::TermsNotAccepted
            };
            self.notify_once(notice);
        }
    }

    /// Explanations for a locked mods list are shown once per session.
    fn notify_once(&mut self, notice: Notice) {
        let kind = match notice {
            Notice::GameUpdateDetected { .. } => "update",
            Notice::VersionsUnavailable { .. } | Notice::NoVersionAvailable => "no_versions",
            Notice::TermsNotAccepted => "terms",
        };
        if self.shown_notices.insert(kind) {
            self.presentation.notify(notice);
        } else {
            debug!("Suppressing repeated notice: {}", kind);
        }
    }

    // ── User actions ────────────────────────────────────

    /// User picked another game version.
    pub fn select_version(&mut self, version: &str) -> ShellResult<()> {
        if !self.versions.contains(version) {
            return Err(ShellError::UnknownVersion(version.to_string()));
        }
        if self.effective_version == version {
            return Ok(());
        }

        info!(
            "Game version changed: {:?} -> {:?}",
            self.effective_version, version
        );
        self.effective_version = version.to_string();
        self.persisted.selected_version = version.to_string();
        self.persist()?;

        if self.session.mods_list_loaded {
            self.load_mods()?;
        }
        Ok(())
    }

    /// Terms accepted on the intro page.
    pub fn agree_to_terms(&mut self) -> ShellResult<()> {
        if self.persisted.has_agreed_to_terms {
            return Ok(());
        }

        info!("Terms accepted");
        self.persisted.has_agreed_to_terms = true;
        self.persist()?;
        if self.mods_availability != Availability::Pending && !self.load_failed {
            self.apply_gating();
        }
        Ok(())
    }

    pub fn install(&mut self) -> ShellResult<()> {
        if self.mods_availability != Availability::Enabled {
            return Err(ShellError::ViewUnavailable(View::ModsList));
        }
        self.mods.install()
    }

    fn persist(&mut self) -> ShellResult<()> {
        self.persisted.write_to(self.store.as_mut());
        self.store.save()
    }
}

impl std::fmt::Debug for SessionStateCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStateCoordinator")
            .field("session", &self.session)
            .field("effective_version", &self.effective_version)
            .field("mods_availability", &self.mods_availability)
            .finish_non_exhaustive()
    }
}
