//! Package model
//!
//! A `Package` is a declarative unit: identity, source reference and a
//! platform-selected `Recipe` supplying the configure/build/install stages.
//! All of its paths are pure functions of settings + identity; a package is
//! constructed fresh for every run and carries no state across runs.

use std::fmt;
use std::path::PathBuf;

use crate::extract::{ArchiveKind, UnpackLayout};
use crate::fingerprint::Fingerprint;
use crate::settings::Settings;
use crate::Result;

/// Package identity: name plus upstream version (or pinned revision id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageId {
    name: String,
    version: String,
}

impl PackageId {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Where a package's source comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A downloadable release archive.
    Archive {
        url: String,
        kind: ArchiveKind,
        layout: UnpackLayout,
    },
    /// A version-control remote checked out at an exact pinned ref.
    Git { url: String, rev: String },
}

impl Source {
    /// Archive source with the kind implied by the URL.
    ///
    /// Descriptor URLs are static, so an extension no extractor handles is a
    /// defect in the descriptor itself; fail loudly at construction.
    pub fn archive(url: impl Into<String>, layout: UnpackLayout) -> Self {
        let url = url.into();
        let Some(kind) = ArchiveKind::from_url(&url) else {
            panic!("no archive kind implied by '{url}'");
        };
        Source::Archive { url, kind, layout }
    }
}

/// Everything a stage needs, handed in explicitly.
///
/// Stages never rely on the process working directory; subprocesses receive
/// these paths as their cwd or as absolute arguments.
pub struct StageCtx<'a> {
    pub settings: &'a Settings,
    /// Unpacked source tree (or git checkout).
    pub src_dir: PathBuf,
    /// Scratch build directory, recreated for every run.
    pub build_dir: PathBuf,
    /// Final artifact destination under the shared install root.
    pub install_dir: PathBuf,
}

/// The three pipeline stages a package must supply.
///
/// One implementation exists per platform per package; the descriptor picks
/// the right one when the package is constructed. Whatever the platform,
/// the produced layout is the same: headers under `include/`, libraries
/// under `lib/`, executables under `bin/`.
pub trait Recipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()>;
    fn build(&self, ctx: &StageCtx<'_>) -> Result<()>;
    fn install(&self, ctx: &StageCtx<'_>) -> Result<()>;
}

/// A third-party dependency: identity, source and build strategy.
pub struct Package {
    id: PackageId,
    source: Source,
    install_name: String,
    unpack_dir: String,
    fingerprint: Fingerprint,
    recipe: Box<dyn Recipe>,
}

impl Package {
    /// `install_name` and `unpack_dir` default to `<name>-<version>`;
    /// override them when the upstream archive or the consuming build
    /// expects something else.
    pub fn new(id: PackageId, source: Source, fingerprint: Fingerprint, recipe: Box<dyn Recipe>) -> Self {
        let default_dir = format!("{}-{}", id.name(), id.version());
        Self {
            id,
            source,
            install_name: default_dir.clone(),
            unpack_dir: default_dir,
            fingerprint,
            recipe,
        }
    }

    /// Directory name under the shared install root, e.g. `Qt5`, `ZeroMQ`.
    pub fn with_install_name(mut self, name: impl Into<String>) -> Self {
        self.install_name = name.into();
        self
    }

    /// Top-level directory the archive unpacks to, when it differs from
    /// `<name>-<version>`.
    pub fn with_unpack_dir(mut self, dir: impl Into<String>) -> Self {
        self.unpack_dir = dir.into();
        self
    }

    pub fn id(&self) -> &PackageId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn recipe(&self) -> &dyn Recipe {
        self.recipe.as_ref()
    }

    pub fn unpack_dir(&self) -> &str {
        &self.unpack_dir
    }

    pub fn install_name(&self) -> &str {
        &self.install_name
    }

    /// The revision stamped after a successful install: upstream version
    /// plus build-flag fingerprint. Any change to either forces a rebuild.
    pub fn revision(&self) -> String {
        format!("{}+{}", self.id.version(), self.fingerprint)
    }

    /// Cached download filename, `None` for version-control sources.
    pub fn archive_file_name(&self) -> Option<String> {
        match &self.source {
            Source::Archive { kind, .. } => Some(format!("{}.{}", self.unpack_dir, kind.extension())),
            Source::Git { .. } => None,
        }
    }

    /// Unpacked source tree under the shared sources directory.
    pub fn unpacked_src_dir(&self, settings: &Settings) -> PathBuf {
        settings.sources_dir().join(&self.unpack_dir)
    }

    /// Scratch build directory, sibling to the unpacked sources.
    pub fn build_dir(&self, settings: &Settings) -> PathBuf {
        settings.sources_dir().join(format!("build_{}", self.unpack_dir))
    }

    /// Final install destination under the shared per-(mode, link) root.
    pub fn install_dir(&self, settings: &Settings) -> PathBuf {
        settings.install_root().join(&self.install_name)
    }

    pub fn stage_ctx<'a>(&self, settings: &'a Settings) -> StageCtx<'a> {
        StageCtx {
            settings,
            src_dir: self.unpacked_src_dir(settings),
            build_dir: self.build_dir(settings),
            install_dir: self.install_dir(settings),
        }
    }
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("install_name", &self.install_name)
            .field("unpack_dir", &self.unpack_dir)
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BuildMode, LinkMode};
    use depstrap_platform::Os;

    struct NoopRecipe;

    impl Recipe for NoopRecipe {
        fn configure(&self, _ctx: &StageCtx<'_>) -> Result<()> {
            Ok(())
        }

        fn build(&self, _ctx: &StageCtx<'_>) -> Result<()> {
            Ok(())
        }

        fn install(&self, _ctx: &StageCtx<'_>) -> Result<()> {
            Ok(())
        }
    }

    fn settings() -> Settings {
        Settings::with_os(
            BuildMode::Release,
            LinkMode::Static,
            Os::Linux,
            PathBuf::from("/checkout"),
        )
    }

    fn archive_package(settings: &Settings) -> Package {
        Package::new(
            PackageId::new("widget", "1.4.0"),
            Source::archive("https://example.org/widget-1.4.0.tar.gz", UnpackLayout::CommonRoot),
            Fingerprint::from_settings(settings),
            Box::new(NoopRecipe),
        )
    }

    #[test]
    fn derived_paths_follow_the_layout() {
        let s = settings();
        let pkg = archive_package(&s);

        assert_eq!(pkg.unpacked_src_dir(&s), s.sources_dir().join("widget-1.4.0"));
        assert_eq!(pkg.build_dir(&s), s.sources_dir().join("build_widget-1.4.0"));
        assert_eq!(pkg.install_dir(&s), s.install_root().join("widget-1.4.0"));
        // The kind came from the URL; the cached filename reflects it.
        assert_eq!(pkg.archive_file_name().unwrap(), "widget-1.4.0.tar.gz");
    }

    #[test]
    #[should_panic(expected = "no archive kind implied")]
    fn unknown_archive_extension_is_rejected_at_construction() {
        let _ = Source::archive("https://example.org/widget-1.4.0.tar.bz2", UnpackLayout::CommonRoot);
    }

    #[test]
    fn overrides_replace_the_defaults() {
        let s = settings();
        let pkg = archive_package(&s)
            .with_install_name("Widget")
            .with_unpack_dir("widget-src-1.4.0");

        assert_eq!(pkg.install_dir(&s), s.install_root().join("Widget"));
        assert_eq!(pkg.unpacked_src_dir(&s), s.sources_dir().join("widget-src-1.4.0"));
        assert_eq!(pkg.archive_file_name().unwrap(), "widget-src-1.4.0.tar.gz");
    }

    #[test]
    fn revision_combines_version_and_fingerprint() {
        let s = settings();
        let pkg = archive_package(&s);
        let revision = pkg.revision();

        assert!(revision.starts_with("1.4.0+"));
        assert_eq!(revision, format!("1.4.0+{}", Fingerprint::from_settings(&s)));
    }

    #[test]
    fn git_sources_have_no_archive_file() {
        let s = settings();
        let pkg = Package::new(
            PackageId::new("pinned", "abc123"),
            Source::Git {
                url: "https://example.org/pinned.git".to_string(),
                rev: "abc123".to_string(),
            },
            Fingerprint::from_settings(&s),
            Box::new(NoopRecipe),
        );

        assert!(pkg.archive_file_name().is_none());
    }
}
