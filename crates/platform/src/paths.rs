//! Cache-root path resolution
//!
//! The third-party root and downloads directory are resolved from
//! environment variables first, falling back to defaults derived from the
//! project root. The overrides let several checkouts share one dependency
//! cache instead of downloading and building everything per checkout.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PlatformError;

/// Overrides the root under which downloads, sources and install trees live.
pub const THIRD_PARTY_ROOT_ENV: &str = "DEPSTRAP_3RD_ROOT";

/// Overrides the downloads directory independently of the third-party root.
pub const DOWNLOADS_DIR_ENV: &str = "DEPSTRAP_DOWNLOADS_DIR";

/// The project checkout root, taken from the invocation's working directory.
pub fn project_root() -> Result<PathBuf, PlatformError> {
    std::env::current_dir().map_err(PlatformError::CurrentDir)
}

/// Root directory for all third-party state.
///
/// `DEPSTRAP_3RD_ROOT` wins when set; the default is `<project_root>/3rd`.
pub fn third_party_root(project_root: &Path) -> PathBuf {
    if let Ok(path) = std::env::var(THIRD_PARTY_ROOT_ENV) {
        debug!(%path, "cache root overridden by {THIRD_PARTY_ROOT_ENV}");
        return PathBuf::from(path);
    }

    project_root.join("3rd")
}

/// Directory that caches downloaded source artifacts.
///
/// `DEPSTRAP_DOWNLOADS_DIR` wins when set; the default is
/// `<third_party_root>/downloads`.
pub fn downloads_dir(third_party_root: &Path) -> PathBuf {
    if let Ok(path) = std::env::var(DOWNLOADS_DIR_ENV) {
        return PathBuf::from(path);
    }

    third_party_root.join("downloads")
}
