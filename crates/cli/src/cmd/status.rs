//! Implementation of the `depstrap status` command.

use anyhow::Result;
use console::style;

use depstrap_platform::Os;

pub fn cmd_status() -> Result<()> {
    let project_root = depstrap_platform::project_root()?;
    let third_party_root = depstrap_platform::third_party_root(&project_root);
    let downloads = depstrap_platform::downloads_dir(&third_party_root);

    println!(
        "{} depstrap v{}",
        style("::").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("  Platform:  {}", Os::current());
    println!("  Project:   {}", project_root.display());

    for (label, path) in [("3rd root", &third_party_root), ("Downloads", &downloads)] {
        let presence = if path.is_dir() {
            style("present").green()
        } else {
            style("absent").dim()
        };
        println!("  {:<9}  {} ({})", format!("{label}:"), path.display(), presence);
    }

    Ok(())
}
