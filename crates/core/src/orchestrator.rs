//! Sequential orchestration over the ordered package list
//!
//! Declaration order encodes dependency precedence: a package whose
//! configure stage references another package's install directory must come
//! after it. Execution is strictly sequential; the shared download/source
//! caches and install root are only safe because exactly one orchestrator
//! runs at a time.

use std::time::Instant;

use tracing::info;

use crate::error::CoreError;
use crate::package::Package;
use crate::pipeline::{self, Outcome};
use crate::settings::Settings;
use crate::Result;

/// Counts for the final run report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rebuilt: usize,
    pub up_to_date: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.rebuilt + self.up_to_date
    }
}

/// Run every package in order, stopping at the first failure.
///
/// The failing package's name travels in the returned error; packages after
/// it are never attempted and already-installed packages are not rolled
/// back.
pub fn run_all(packages: &[Package], settings: &Settings) -> Result<RunSummary> {
    settings.ensure_dirs()?;

    let mut summary = RunSummary::default();

    for pkg in packages {
        let started = Instant::now();
        match pipeline::run(pkg, settings) {
            Ok(Outcome::UpToDate) => {
                println!("{} is up to date", pkg.id());
                summary.up_to_date += 1;
            }
            Ok(Outcome::Rebuilt) => {
                println!("{} installed in {:.1}s", pkg.id(), started.elapsed().as_secs_f64());
                summary.rebuilt += 1;
            }
            Err(source) => {
                return Err(CoreError::PackageFailed {
                    package: pkg.name().to_string(),
                    source: Box::new(source),
                });
            }
        }
    }

    info!(rebuilt = summary.rebuilt, up_to_date = summary.up_to_date, "all packages ready");
    Ok(summary)
}
