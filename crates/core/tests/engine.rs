//! Engine tests: pipeline caching semantics and orchestrator sequencing.
//!
//! Packages here use archives pre-seeded into the downloads directory, so
//! the download step always hits its filename-presence cache and no test
//! touches the network. Recipes write marker files instead of invoking
//! build tools.

use std::fs::{self, File};
use std::path::PathBuf;

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

use depstrap_core::error::CoreError;
use depstrap_core::extract::{ArchiveKind, UnpackLayout};
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::orchestrator;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::pipeline::{self, Outcome};
use depstrap_core::settings::{BuildMode, LinkMode, Settings};
use depstrap_core::stamp;
use depstrap_core::Result;
use depstrap_platform::Os;

struct TestEnv {
    _temp: TempDir,
    settings: Settings,
}

impl TestEnv {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let settings = Settings::with_os(
            BuildMode::Release,
            LinkMode::Static,
            Os::Linux,
            temp.path().to_path_buf(),
        );
        settings.ensure_dirs().unwrap();
        Self { _temp: temp, settings }
    }

    /// Seed `<downloads>/<dir>.tar.gz` containing `<dir>/src.c`, so the
    /// download step is a guaranteed cache hit.
    fn seed_archive(&self, dir: &str) {
        let archive = self.settings.downloads_dir().join(format!("{dir}.tar.gz"));
        let file = File::create(&archive).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let data = b"int main(void) { return 0; }\n";
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, format!("{dir}/src.c"), &data[..]).unwrap();
        builder.into_inner().unwrap().finish().unwrap();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailAt {
    Build,
}

struct MarkerRecipe {
    fail_at: Option<FailAt>,
}

impl MarkerRecipe {
    fn ok() -> Box<Self> {
        Box::new(Self { fail_at: None })
    }

    fn failing_build() -> Box<Self> {
        Box::new(Self { fail_at: Some(FailAt::Build) })
    }
}

impl Recipe for MarkerRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        fs::write(ctx.build_dir.join("configured"), "ok")?;
        Ok(())
    }

    fn build(&self, ctx: &StageCtx<'_>) -> Result<()> {
        if self.fail_at == Some(FailAt::Build) {
            return Err(CoreError::CommandFailed {
                program: "make".to_string(),
                code: Some(2),
            });
        }
        fs::write(ctx.build_dir.join("built"), "ok")?;
        Ok(())
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        fs::create_dir_all(ctx.install_dir.join("lib"))?;
        fs::create_dir_all(ctx.install_dir.join("include"))?;
        fs::write(ctx.install_dir.join("lib/libmarker.a"), "archive")?;
        fs::write(ctx.install_dir.join("include/marker.h"), "// api")?;
        Ok(())
    }
}

fn package(env: &TestEnv, name: &str, recipe: Box<dyn Recipe>) -> Package {
    package_with_flags(env, name, recipe, &[])
}

fn package_with_flags(env: &TestEnv, name: &str, recipe: Box<dyn Recipe>, flags: &[&str]) -> Package {
    env.seed_archive(&format!("{name}-1.0"));
    Package::new(
        PackageId::new(name, "1.0"),
        Source::Archive {
            // Unreachable on purpose; the seeded download must satisfy it.
            url: format!("http://127.0.0.1:1/{name}-1.0.tar.gz"),
            kind: ArchiveKind::TarGz,
            layout: UnpackLayout::CommonRoot,
        },
        Fingerprint::compute(&env.settings, flags.iter().copied()),
        recipe,
    )
}

fn install_dir(env: &TestEnv, pkg: &Package) -> PathBuf {
    pkg.install_dir(&env.settings)
}

#[test]
fn full_run_installs_and_stamps() {
    let env = TestEnv::new();
    let pkg = package(&env, "alpha", MarkerRecipe::ok());

    let outcome = pipeline::run(&pkg, &env.settings).unwrap();
    assert_eq!(outcome, Outcome::Rebuilt);

    let install = install_dir(&env, &pkg);
    assert!(install.join("lib/libmarker.a").is_file());
    assert!(install.join("include/marker.h").is_file());

    let stamped = fs::read_to_string(install.join(stamp::REVISION_FILE)).unwrap();
    assert_eq!(stamped, pkg.revision());
}

#[test]
fn second_run_is_a_pure_cache_hit() {
    let env = TestEnv::new();
    let pkg = package(&env, "beta", MarkerRecipe::ok());

    pipeline::run(&pkg, &env.settings).unwrap();

    // Remove every input the rebuild path would need; a cache hit must not
    // notice.
    fs::remove_file(env.settings.downloads_dir().join("beta-1.0.tar.gz")).unwrap();
    fs::remove_dir_all(env.settings.sources_dir()).unwrap();

    let outcome = pipeline::run(&pkg, &env.settings).unwrap();
    assert_eq!(outcome, Outcome::UpToDate);
    assert!(install_dir(&env, &pkg).join("lib/libmarker.a").is_file());
}

#[test]
fn revision_change_forces_a_rebuild() {
    let env = TestEnv::new();
    let pkg = package(&env, "gamma", MarkerRecipe::ok());
    pipeline::run(&pkg, &env.settings).unwrap();

    let bumped = package_with_flags(&env, "gamma", MarkerRecipe::ok(), &["--with-feature"]);
    assert_ne!(pkg.revision(), bumped.revision());

    let outcome = pipeline::run(&bumped, &env.settings).unwrap();
    assert_eq!(outcome, Outcome::Rebuilt);

    let stamped = fs::read_to_string(install_dir(&env, &bumped).join(stamp::REVISION_FILE)).unwrap();
    assert_eq!(stamped, bumped.revision());
}

#[test]
fn failed_build_leaves_no_stamp_and_no_install() {
    let env = TestEnv::new();
    let pkg = package(&env, "delta", MarkerRecipe::failing_build());

    let err = pipeline::run(&pkg, &env.settings).unwrap_err();
    assert!(matches!(err, CoreError::CommandFailed { code: Some(2), .. }));

    let install = install_dir(&env, &pkg);
    assert!(!install.exists());
    assert!(!stamp::is_up_to_date(&install, &pkg.revision()));

    // The build directory keeps its partial state for inspection.
    assert!(pkg.build_dir(&env.settings).join("configured").is_file());
}

#[test]
fn build_dir_is_never_reused() {
    let env = TestEnv::new();
    let pkg = package(&env, "epsilon", MarkerRecipe::ok());

    let build_dir = pkg.build_dir(&env.settings);
    fs::create_dir_all(&build_dir).unwrap();
    fs::write(build_dir.join("leftover.o"), "stale object").unwrap();

    pipeline::run(&pkg, &env.settings).unwrap();

    assert!(!build_dir.join("leftover.o").exists());
    assert!(build_dir.join("configured").is_file());
}

#[test]
fn unstamped_install_dir_is_discarded_and_rebuilt() {
    let env = TestEnv::new();
    let pkg = package(&env, "zeta", MarkerRecipe::ok());

    // A partially written install tree from a killed run: files, no stamp.
    let install = install_dir(&env, &pkg);
    fs::create_dir_all(install.join("lib")).unwrap();
    fs::write(install.join("lib/half-written.a"), "junk").unwrap();

    let outcome = pipeline::run(&pkg, &env.settings).unwrap();
    assert_eq!(outcome, Outcome::Rebuilt);
    assert!(!install.join("lib/half-written.a").exists());
    assert!(install.join("lib/libmarker.a").is_file());
}

#[test]
fn orchestrator_stops_at_first_failure() {
    let env = TestEnv::new();
    let a = package(&env, "aaa", MarkerRecipe::ok());
    let b = package(&env, "bbb", MarkerRecipe::failing_build());
    let c = package(&env, "ccc", MarkerRecipe::ok());

    let err = orchestrator::run_all(&[a, b, c], &env.settings).unwrap_err();
    assert_eq!(err.failed_package(), Some("bbb"));

    // A completed fully.
    let a_install = env.settings.install_root().join("aaa-1.0");
    assert!(a_install.join(stamp::REVISION_FILE).is_file());
    assert!(a_install.join("lib/libmarker.a").is_file());

    // B was attempted but never stamped.
    assert!(!env.settings.install_root().join("bbb-1.0").exists());

    // C was never attempted: its archive was not even unpacked.
    assert!(!env.settings.sources_dir().join("ccc-1.0").exists());
    assert!(!env.settings.install_root().join("ccc-1.0").exists());
}

#[test]
fn run_all_reports_rebuilt_then_cached() {
    let env = TestEnv::new();

    let first = orchestrator::run_all(
        &[package(&env, "one", MarkerRecipe::ok()), package(&env, "two", MarkerRecipe::ok())],
        &env.settings,
    )
    .unwrap();
    assert_eq!(first.rebuilt, 2);
    assert_eq!(first.up_to_date, 0);

    let second = orchestrator::run_all(
        &[package(&env, "one", MarkerRecipe::ok()), package(&env, "two", MarkerRecipe::ok())],
        &env.settings,
    )
    .unwrap();
    assert_eq!(second.rebuilt, 0);
    assert_eq!(second.up_to_date, 2);
    assert_eq!(second.total(), 2);
}

#[test]
fn isolated_git_checkout_is_skipped_when_sources_exist() {
    let env = TestEnv::new();

    // Pre-seed the checkout directory; the pipeline must treat it as cached
    // and never invoke git against the unreachable remote.
    let checkout = env.settings.sources_dir().join("pinned-3f2a");
    fs::create_dir_all(&checkout).unwrap();
    fs::write(checkout.join("defs.proto"), "syntax = \"proto3\";").unwrap();

    let pkg = Package::new(
        PackageId::new("pinned", "3f2a"),
        Source::Git {
            url: "http://127.0.0.1:1/pinned.git".to_string(),
            rev: "3f2a".to_string(),
        },
        Fingerprint::from_settings(&env.settings),
        MarkerRecipe::ok(),
    )
    .with_unpack_dir("pinned-3f2a");

    let outcome = pipeline::run(&pkg, &env.settings).unwrap();
    assert_eq!(outcome, Outcome::Rebuilt);
    assert!(checkout.join("defs.proto").is_file());
}
