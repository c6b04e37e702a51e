use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::version::{DEFAULT_VERSION_FILE, DEFAULT_VERSION_URL};

const APP_DIR_NAME: &str = "ModShell";
const CONFIG_FILE: &str = "shell_config.json";
const SETTINGS_FILE: &str = "settings.json";

/// Static configuration of the shell, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Endpoint returning the JSON array of supported game versions.
    pub api_url: String,
    /// Directory holding `settings.json` and `shell_config.json`.
    pub data_dir: PathBuf,
    /// Game install directory; the installed version is not probed when unset.
    pub install_dir: Option<PathBuf>,
    /// Version-bearing file, relative to `install_dir`.
    pub version_file: PathBuf,
}

/// On-disk overrides. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_url: Option<String>,
    data_dir: Option<PathBuf>,
    install_dir: Option<PathBuf>,
    version_file: Option<PathBuf>,
}

impl ShellConfig {
    /// Defaults rooted at `data_dir`, without touching the disk.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_url: DEFAULT_VERSION_URL.to_string(),
            data_dir: data_dir.into(),
            install_dir: None,
            version_file: PathBuf::from(DEFAULT_VERSION_FILE),
        }
    }

    /// Load from the platform data directory.
    pub fn load() -> Self {
        Self::load_from(&default_data_dir())
    }

    /// Apply `shell_config.json` found in `data_dir` on top of the defaults.
    /// A missing or corrupt file leaves the defaults in place.
    pub fn load_from(data_dir: &Path) -> Self {
        let mut config = Self::with_data_dir(data_dir);
        let Some(file) = load_config_from_disk(data_dir) else {
            return config;
        };

        if let Some(api_url) = file.api_url {
            config.api_url = api_url;
        }
        if let Some(dir) = file.data_dir {
            if !dir.exists() {
                let _ = std::fs::create_dir_all(&dir);
            }
            config.data_dir = dir;
        }
        if file.install_dir.is_some() {
            config.install_dir = file.install_dir;
        }
        if let Some(version_file) = file.version_file {
            config.version_file = version_file;
        }

        debug!("Loaded shell configuration: {:?}", config);
        config
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }
}

fn load_config_from_disk(data_dir: &Path) -> Option<ConfigFile> {
    let path = data_dir.join(CONFIG_FILE);
    let raw = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(file) => Some(file),
        Err(e) => {
            warn!("Ignoring corrupt {:?}: {}", path, e);
            None
        }
    }
}

fn default_base_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_data_dir() -> PathBuf {
    let dir = default_base_dir().join(APP_DIR_NAME);

    if !dir.exists() {
        let _ = std::fs::create_dir_all(&dir);
    }

    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShellConfig::load_from(dir.path());

        assert_eq!(config, ShellConfig::with_data_dir(dir.path()));
        assert_eq!(config.api_url, DEFAULT_VERSION_URL);
        assert_eq!(config.settings_path(), dir.path().join("settings.json"));
    }

    #[test]
    fn file_overrides_selected_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "api_url": "http://localhost:8080/version", "install_dir": "/games/bs" }"#,
        )
        .unwrap();

        let config = ShellConfig::load_from(dir.path());
        assert_eq!(config.api_url, "http://localhost:8080/version");
        assert_eq!(config.install_dir, Some(PathBuf::from("/games/bs")));
        assert_eq!(config.version_file, PathBuf::from(DEFAULT_VERSION_FILE));
        assert_eq!(config.data_dir, dir.path());
    }

    #[test]
    fn data_dir_can_be_redirected() {
        let dir = tempfile::tempdir().unwrap();
        let moved = dir.path().join("elsewhere");
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            serde_json::json!({ "data_dir": moved }).to_string(),
        )
        .unwrap();

        let config = ShellConfig::load_from(dir.path());
        assert_eq!(config.data_dir, moved);
        assert!(moved.is_dir());
        assert_eq!(config.settings_path(), moved.join("settings.json"));
    }

    #[test]
    fn corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "api_url = 'toml?'").unwrap();

        assert_eq!(
            ShellConfig::load_from(dir.path()),
            ShellConfig::with_data_dir(dir.path())
        );
    }
}
