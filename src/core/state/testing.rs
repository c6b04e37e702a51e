// In-memory collaborators shared by the coordinator and shell tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::collaborators::{Feature, ModCatalog, Notice, Presentation};
use super::session::View;
use super::store::{MemoryStore, SettingsStore};
use crate::core::error::{ShellError, ShellResult};
use crate::core::version::VersionList;

#[derive(Debug, Default)]
struct PresentationLog {
    enabled: HashMap<Feature, bool>,
    active: Option<View>,
    versions: Option<(Vec<String>, String)>,
    notices: Vec<Notice>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingPresentation {
    log: Arc<Mutex<PresentationLog>>,
}

impl RecordingPresentation {
    pub fn enabled(&self, feature: Feature) -> Option<bool> {
        self.log.lock().unwrap().enabled.get(&feature).copied()
    }

    pub fn active(&self) -> Option<View> {
        self.log.lock().unwrap().active
    }

    pub fn shown_versions(&self) -> Option<(Vec<String>, String)> {
        self.log.lock().unwrap().versions.clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.log.lock().unwrap().notices.clone()
    }
}

impl Presentation for RecordingPresentation {
    fn set_view_enabled(&mut self, feature: Feature, enabled: bool) {
        self.log.lock().unwrap().enabled.insert(feature, enabled);
    }

    fn set_active_content(&mut self, view: View) {
        self.log.lock().unwrap().active = Some(view);
    }

    fn show_versions(&mut self, versions: &VersionList, selected: &str) {
        self.log.lock().unwrap().versions = Some((
            versions.iter().map(str::to_string).collect(),
            selected.to_string(),
        ));
    }

    fn notify(&mut self, notice: Notice) {
        self.log.lock().unwrap().notices.push(notice);
    }
}

#[derive(Debug, Default)]
struct StoreState {
    inner: MemoryStore,
    fail_saves: bool,
}

/// Memory store that stays inspectable after being boxed into a coordinator.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    state: Arc<Mutex<StoreState>>,
}

impl SharedStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                inner,
                fail_saves: false,
            })),
        }
    }

    pub fn saves(&self) -> usize {
        self.state.lock().unwrap().inner.saves()
    }

    pub fn fail_saves(&self, fail: bool) {
        self.state.lock().unwrap().fail_saves = fail;
    }
}

impl SettingsStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.state.lock().unwrap().inner.get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        self.state.lock().unwrap().inner.set(key, value);
    }

    fn save(&mut self) -> ShellResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_saves {
            return Err(ShellError::Persistence {
                path: PathBuf::from("settings.json"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        state.inner.save()
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    loads: usize,
    installs: usize,
    pending: bool,
    fail_next_load: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeCatalog {
    state: Arc<Mutex<CatalogState>>,
}

impl FakeCatalog {
    pub fn loads(&self) -> usize {
        self.state.lock().unwrap().loads
    }

    pub fn installs(&self) -> usize {
        self.state.lock().unwrap().installs
    }

    pub fn pending(&self) -> bool {
        self.state.lock().unwrap().pending
    }

    pub fn set_pending(&self, pending: bool) {
        self.state.lock().unwrap().pending = pending;
    }

    pub fn fail_next_load(&self) {
        self.state.lock().unwrap().fail_next_load = true;
    }
}

impl ModCatalog for FakeCatalog {
    fn load(&mut self) -> ShellResult<()> {
        let mut state = self.state.lock().unwrap();
        if std::mem::take(&mut state.fail_next_load) {
            return Err(ShellError::ModCatalog("mod index unreachable".into()));
        }
        state.loads += 1;
        state.pending = false;
        Ok(())
    }

    fn install(&mut self) -> ShellResult<()> {
        self.state.lock().unwrap().installs += 1;
        Ok(())
    }

    fn has_pending_changes(&self) -> bool {
        self.state.lock().unwrap().pending
    }
}
