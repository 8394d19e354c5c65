//! Implementation of the `depstrap build` command.
//!
//! Resolves settings, assembles the registry and hands the ordered list to
//! the orchestrator. The first package failure stops the run; its name is
//! reported and the process exits non-zero.

use std::time::{Duration, Instant};

use anyhow::Result;
use console::style;

use depstrap_core::orchestrator;
use depstrap_core::settings::Settings;
use depstrap_core::CoreError;
use depstrap_pkgs::required_packages;

use super::parse_modes;

pub fn cmd_build(build_mode: &str, link_mode: &str, with_tests: bool) -> Result<()> {
    let (build, link) = parse_modes(build_mode, link_mode);

    let project_root = depstrap_platform::project_root()?;
    let settings = Settings::new(build, link, project_root);

    println!("Build mode        : {}", settings.build_mode());
    println!("Link mode         : {}", settings.link_mode());
    println!("Download path     : {}", settings.downloads_dir().display());
    println!("Install dir       : {}", settings.install_root().display());
    println!();

    let packages = required_packages(&settings, with_tests);
    println!(
        "{} Bootstrapping {} package(s)",
        style("::").cyan().bold(),
        packages.len()
    );

    let started = Instant::now();
    match orchestrator::run_all(&packages, &settings) {
        Ok(summary) => {
            let elapsed = Duration::from_secs(started.elapsed().as_secs());
            println!();
            println!(
                "{} All packages ready in {}",
                style("::").green().bold(),
                humantime::format_duration(elapsed)
            );
            println!("  Rebuilt:    {}", summary.rebuilt);
            println!("  Up to date: {}", summary.up_to_date);
            Ok(())
        }
        Err(CoreError::PackageFailed { package, source }) => {
            eprintln!();
            eprintln!(
                "{} FAILED to build {}: {}",
                style("error:").red().bold(),
                package,
                source
            );
            // No partial continuation: packages after the failing one were
            // never attempted.
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("{} {}", style("error:").red().bold(), err);
            std::process::exit(1);
        }
    }
}
