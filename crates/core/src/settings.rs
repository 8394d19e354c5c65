//! Process-wide build settings
//!
//! `Settings` is constructed once from the parsed command line and is
//! immutable afterwards. Every other engine component reads it; nothing
//! writes it. The directory layout is derived here so a package's paths are
//! pure functions of settings + package identity.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use depstrap_platform::Os;

use crate::Result;

/// Build mode for every third-party package and the surrounding project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }

    /// Parse the user-facing mode name. Returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "debug" => Some(BuildMode::Debug),
            "release" => Some(BuildMode::Release),
            _ => None,
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How third-party libraries are linked into the final application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    Static,
    Shared,
}

impl LinkMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LinkMode::Static => "static",
            LinkMode::Shared => "shared",
        }
    }

    /// Parse the user-facing link mode name. Returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "static" => Some(LinkMode::Static),
            "shared" => Some(LinkMode::Shared),
            _ => None,
        }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Process-wide configuration, constructed once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    build_mode: BuildMode,
    link_mode: LinkMode,
    os: Os,
    project_root: PathBuf,
    third_party_root: PathBuf,
    downloads_dir: PathBuf,
    sources_dir: PathBuf,
    install_root: PathBuf,
}

impl Settings {
    /// Build settings for the detected host OS.
    pub fn new(build_mode: BuildMode, link_mode: LinkMode, project_root: PathBuf) -> Self {
        Self::with_os(build_mode, link_mode, Os::current(), project_root)
    }

    /// Build settings for an explicit OS.
    ///
    /// The environment overrides for the cache roots are resolved here, once;
    /// later changes to the environment have no effect on a constructed value.
    pub fn with_os(build_mode: BuildMode, link_mode: LinkMode, os: Os, project_root: PathBuf) -> Self {
        let third_party_root = depstrap_platform::third_party_root(&project_root);
        let downloads_dir = depstrap_platform::downloads_dir(&third_party_root);
        let sources_dir = third_party_root.join("sources");

        // Static is the default link mode; it keeps the bare mode name so
        // existing caches stay valid.
        let install_root = match link_mode {
            LinkMode::Static => third_party_root.join(build_mode.as_str()),
            LinkMode::Shared => third_party_root.join(format!("{}-{}", build_mode, link_mode)),
        };

        Self {
            build_mode,
            link_mode,
            os,
            project_root,
            third_party_root,
            downloads_dir,
            sources_dir,
            install_root,
        }
    }

    pub fn build_mode(&self) -> BuildMode {
        self.build_mode
    }

    pub fn link_mode(&self) -> LinkMode {
        self.link_mode
    }

    pub fn os(&self) -> Os {
        self.os
    }

    pub fn on_windows(&self) -> bool {
        self.os == Os::Windows
    }

    pub fn on_linux(&self) -> bool {
        self.os == Os::Linux
    }

    pub fn on_macos(&self) -> bool {
        self.os == Os::Darwin
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn third_party_root(&self) -> &Path {
        &self.third_party_root
    }

    /// Shared cache of downloaded source artifacts.
    pub fn downloads_dir(&self) -> &Path {
        &self.downloads_dir
    }

    /// Shared cache of unpacked source trees (and per-package build dirs).
    pub fn sources_dir(&self) -> &Path {
        &self.sources_dir
    }

    /// Per-(mode, link) root under which every package installs.
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Parallelism degree handed to the native build tool (`make -j`).
    ///
    /// Opaque to the orchestrator itself, which stays strictly sequential
    /// across packages.
    pub fn jobs(&self) -> usize {
        num_cpus::get()
    }

    /// Eagerly create the directory layout.
    ///
    /// Called before any package is processed; every path is expected to
    /// exist from then on.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            &self.third_party_root,
            &self.downloads_dir,
            &self.sources_dir,
            &self.install_root,
        ] {
            fs::create_dir_all(dir)?;
        }
        debug!(root = %self.third_party_root.display(), "directory layout ready");
        Ok(())
    }
}
