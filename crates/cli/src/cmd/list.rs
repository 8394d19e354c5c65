//! Implementation of the `depstrap list` command.

use anyhow::Result;
use serde_json::json;

use depstrap_core::package::Source;
use depstrap_core::settings::Settings;
use depstrap_pkgs::required_packages;

use super::parse_modes;

pub fn cmd_list(build_mode: &str, link_mode: &str, with_tests: bool, as_json: bool) -> Result<()> {
    let (build, link) = parse_modes(build_mode, link_mode);

    let project_root = depstrap_platform::project_root()?;
    let settings = Settings::new(build, link, project_root);
    let packages = required_packages(&settings, with_tests);

    if as_json {
        let entries: Vec<_> = packages
            .iter()
            .map(|pkg| {
                let source = match pkg.source() {
                    Source::Archive { url, kind, .. } => json!({
                        "type": "archive",
                        "url": url,
                        "kind": kind.extension(),
                    }),
                    Source::Git { url, rev } => json!({
                        "type": "git",
                        "url": url,
                        "rev": rev,
                    }),
                };
                json!({
                    "name": pkg.name(),
                    "version": pkg.id().version(),
                    "revision": pkg.revision(),
                    "install_name": pkg.install_name(),
                    "source": source,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for pkg in &packages {
        let origin = match pkg.source() {
            Source::Archive { url, .. } => url.clone(),
            Source::Git { url, rev } => format!("{url}@{}", &rev[..8.min(rev.len())]),
        };
        println!(
            "{:<22} {:<12} {:<24} {}",
            pkg.name(),
            pkg.id().version(),
            pkg.revision(),
            origin
        );
    }

    Ok(())
}
