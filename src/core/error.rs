use std::path::PathBuf;
use thiserror::Error;

use crate::core::state::View;

/// Failure while retrieving the remote version list.
///
/// Always recovered by the coordinator: version-dependent features are
/// disabled and the user is warned once.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Version endpoint {url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Version list is not a JSON array of strings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Version endpoint returned an empty list")]
    EmptyList,

    #[error("Version fetch task ended without reporting a result")]
    Interrupted,
}

/// Central error type for the shell core.
/// Every module returns `Result<T, ShellError>`.
#[derive(Debug, Error)]
pub enum ShellError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Persistence ─────────────────────────────────────
    #[error("Could not persist settings to {path:?}: {source}")]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Versions ────────────────────────────────────────
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Version {0} is not in the supported version list")]
    UnknownVersion(String),

    // ── Session ─────────────────────────────────────────
    #[error("View {0} is not available yet")]
    ViewUnavailable(View),

    #[error("Mod catalog error: {0}")]
    ModCatalog(String),

    // ── Programming errors ──────────────────────────────
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type ShellResult<T> = Result<T, ShellError>;

impl From<std::io::Error> for ShellError {
    fn from(source: std::io::Error) -> Self {
        ShellError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
