// ─── Settings Store ───
// Key-value persistence used for everything the shell remembers between runs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::core::error::{ShellError, ShellResult};

/// Durable key-value settings. `set` only stages a value; `save` flushes.
pub trait SettingsStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn save(&mut self) -> ShellResult<()>;
}

/// Settings persisted as a flat JSON object, e.g. `settings.json`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts empty; a corrupt one is
    /// logged and replaced on the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(values) => values,
                Err(e) => {
                    warn!("Corrupt settings file at {:?}: {}", path, e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("Cannot read {:?}: {}", path, e);
                BTreeMap::new()
            }
        };
        debug!("Loaded {} settings from {:?}", values.len(), path);
        Self { path, values }
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn save(&mut self) -> ShellResult<()> {
        let json = serde_json::to_string_pretty(&self.values)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ShellError::Persistence {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, json).map_err(|source| ShellError::Persistence {
            path: self.path.clone(),
            source,
        })
    }
}

/// Volatile store, used when nothing should touch the disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of flushes performed so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn save(&mut self) -> ShellResult<()> {
        self.saves += 1;
        Ok(())
    }
}
