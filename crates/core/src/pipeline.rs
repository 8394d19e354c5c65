//! Pipeline driver
//!
//! Runs the full fetch → extract → configure → build → install → stamp
//! sequence for one package, gated by the revision stamp. Only the stamp is
//! durable; the per-run stage progression exists for logging and is
//! indistinguishable, after an interrupted run, from never having started.

use std::fs;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::copy::remove_fs_object;
use crate::package::{Package, Source};
use crate::settings::Settings;
use crate::{extract, fetch, stamp, Result};

/// Ephemeral per-run progress of a single package, logged at each boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    NotStarted,
    Downloaded,
    Unpacked,
    BuildDirPrepared,
    Configured,
    Built,
    Installed,
    Stamped,
}

/// How a pipeline run concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The stamp matched; nothing was touched.
    UpToDate,
    /// The full sequence ran and a fresh stamp was committed.
    Rebuilt,
}

/// Run the pipeline for one package.
///
/// On a cache hit nothing is written. Otherwise the build directory is
/// recreated from scratch, the install directory is removed (a directory
/// without a matching stamp is never reused, partial or not), the three
/// recipe stages run in order, and the stamp is committed last. Any stage
/// failure propagates with no stamp written and no cleanup of the partial
/// state.
pub fn run(pkg: &Package, settings: &Settings) -> Result<Outcome> {
    let install_dir = pkg.install_dir(settings);
    let revision = pkg.revision();

    if stamp::is_up_to_date(&install_dir, &revision) {
        debug!(package = pkg.name(), revision, "up to date");
        return Ok(Outcome::UpToDate);
    }

    println!("Start building {}", pkg.id());
    info!(package = pkg.name(), revision, "building");
    advance(pkg, StageState::NotStarted);

    match pkg.source() {
        Source::Archive { url, kind, layout } => {
            // The cached filename is derived by the package itself and is
            // always present for an archive source.
            let Some(file_name) = pkg.archive_file_name() else {
                unreachable!("archive source without a file name");
            };
            let archive = settings.downloads_dir().join(file_name);

            fetch::download(url, &archive)?;
            advance(pkg, StageState::Downloaded);

            extract::extract(&archive, *kind, *layout, settings.sources_dir(), &pkg.unpacked_src_dir(settings))?;
            advance(pkg, StageState::Unpacked);
        }
        Source::Git { url, rev } => {
            fetch::checkout_git(url, rev, &pkg.unpacked_src_dir(settings))?;
            advance(pkg, StageState::Unpacked);
        }
    }

    // The build directory is never reused across runs; only downloads,
    // sources and stamped installs are cached.
    let build_dir = pkg.build_dir(settings);
    remove_fs_object(&build_dir)?;
    fs::create_dir_all(&build_dir)?;

    // The install directory is about to be fully regenerated.
    remove_fs_object(&install_dir)?;
    advance(pkg, StageState::BuildDirPrepared);

    let ctx = pkg.stage_ctx(settings);
    pkg.recipe().configure(&ctx)?;
    advance(pkg, StageState::Configured);

    pkg.recipe().build(&ctx)?;
    advance(pkg, StageState::Built);

    pkg.recipe().install(&ctx)?;
    advance(pkg, StageState::Installed);

    fs::create_dir_all(&install_dir)?;
    stamp::commit(&install_dir, &revision)?;
    advance(pkg, StageState::Stamped);

    let installed_files = WalkDir::new(&install_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count();
    info!(package = pkg.name(), files = installed_files, "installed");

    Ok(Outcome::Rebuilt)
}

fn advance(pkg: &Package, state: StageState) {
    debug!(package = pkg.name(), state = ?state, "pipeline stage");
}
