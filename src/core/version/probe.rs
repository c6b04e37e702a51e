// ─── Local Version Probe ───
// Detects the version of the installed game from its data files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::error::{ShellError, ShellResult};

pub const DEFAULT_VERSION_FILE: &str = "Beat Saber_Data/globalgamemanagers";

/// The version string sits shortly after this bundle marker.
const VERSION_MARKER: &[u8] = b"public.app-category.games";
const SEARCH_WINDOW: usize = 256;

pub trait LocalVersionProbe: Send + Sync {
    /// Installed game version, `None` when it cannot be determined.
    fn detect(&self) -> Option<String>;
}

/// Reads the version out of a file inside the game install directory.
#[derive(Debug, Clone)]
pub struct InstallDirProbe {
    install_dir: PathBuf,
    version_file: PathBuf,
}

impl InstallDirProbe {
    pub fn new(install_dir: impl Into<PathBuf>, version_file: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.into(),
            version_file: version_file.into(),
        }
    }

    pub fn version_file_path(&self) -> PathBuf {
        self.install_dir.join(&self.version_file)
    }

    pub fn read_version(&self) -> ShellResult<Option<String>> {
        let path = self.version_file_path();
        let bytes = std::fs::read(&path).map_err(|source| ShellError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(extract_version(&bytes))
    }
}

impl LocalVersionProbe for InstallDirProbe {
    fn detect(&self) -> Option<String> {
        match self.read_version() {
            Ok(Some(version)) => {
                debug!("Detected installed game version {}", version);
                Some(version)
            }
            Ok(None) => {
                warn!(
                    "No version string found in {:?}",
                    self.version_file_path()
                );
                None
            }
            Err(e) => {
                warn!("Cannot detect installed game version: {}", e);
                None
            }
        }
    }
}

/// No install directory configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl LocalVersionProbe for NoProbe {
    fn detect(&self) -> Option<String> {
        None
    }
}

/// First `digits(.digits)+` token following the marker. Build suffixes such
/// as `_4575554838` are not part of the token.
fn extract_version(bytes: &[u8]) -> Option<String> {
    let start = find(bytes, VERSION_MARKER)? + VERSION_MARKER.len();
    let end = bytes.len().min(start + SEARCH_WINDOW);
    let window = &bytes[start..end];

    let mut i = 0;
    while i < window.len() {
        if window[i].is_ascii_digit() {
            let len = window[i..]
                .iter()
                .take_while(|b| b.is_ascii_digit() || **b == b'.')
                .count();
            let token = std::str::from_utf8(&window[i..i + len]).ok()?;
            let token = token.trim_end_matches('.');
            if is_version(token) {
                return Some(token.to_string());
            }
            i += len;
        } else {
            i += 1;
        }
    }
    None
}

fn is_version(token: &str) -> bool {
    let mut parts = 0;
    for part in token.split('.') {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        parts += 1;
    }
    parts >= 2
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Build the probe matching the configured install directory.
pub fn probe_for(install_dir: Option<&Path>, version_file: &Path) -> Arc<dyn LocalVersionProbe> {
    match install_dir {
        Some(dir) => Arc::new(InstallDirProbe::new(dir, version_file)),
        None => Arc::new(NoProbe),
    }
}
