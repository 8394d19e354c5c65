//! Error types for depstrap-core

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while bootstrapping packages
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("platform error: {0}")]
    Platform(#[from] depstrap_platform::PlatformError),

    #[error("failed to download '{url}': {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("download of '{url}' returned HTTP {status}")]
    DownloadStatus { url: String, status: reqwest::StatusCode },

    #[error("failed to extract '{archive}': {source}")]
    Extract {
        archive: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command '{program}' exited with status {code:?}")]
    CommandFailed { program: String, code: Option<i32> },

    #[error("package '{package}' failed: {source}")]
    PackageFailed {
        package: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Name of the failing package, when this error came out of the
    /// orchestrator loop.
    pub fn failed_package(&self) -> Option<&str> {
        match self {
            CoreError::PackageFailed { package, .. } => Some(package),
            _ => None,
        }
    }
}
