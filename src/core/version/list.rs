// ─── Version List ───
// Ordered set of mod-compatible game versions as published by the API.

use serde::{Deserialize, Serialize};

use crate::core::error::FetchError;

/// Versions in the order the remote source returned them.
/// The first entry is the latest release and the default fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionList(Vec<String>);

impl VersionList {
    /// Parse an API response body. Anything but a non-empty JSON array of
    /// strings is rejected.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        let versions: Vec<String> = serde_json::from_str(body)?;
        if versions.is_empty() {
            return Err(FetchError::EmptyList);
        }
        Ok(Self(versions))
    }

    /// Comma-joined snapshot used to detect upstream changes between runs.
    pub fn canonical(&self) -> String {
        self.0.join(",")
    }

    pub fn contains(&self, version: &str) -> bool {
        self.0.iter().any(|v| v == version)
    }

    /// The latest/default entry, `None` for an empty list.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for VersionList {
    fn from(versions: Vec<String>) -> Self {
        Self(versions)
    }
}

impl<const N: usize> From<[&str; N]> for VersionList {
    fn from(versions: [&str; N]) -> Self {
        Self(versions.iter().map(|v| v.to_string()).collect())
    }
}
