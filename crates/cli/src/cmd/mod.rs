mod build;
mod list;
mod status;

pub use build::cmd_build;
pub use list::cmd_list;
pub use status::cmd_status;

use console::style;
use depstrap_core::settings::{BuildMode, LinkMode};

/// Parse the positional mode arguments, exiting with a styled error on
/// unknown values.
fn parse_modes(build_mode: &str, link_mode: &str) -> (BuildMode, LinkMode) {
    let build = BuildMode::parse(build_mode).unwrap_or_else(|| {
        eprintln!(
            "{} Unknown build mode: {}. Supported: debug, release",
            style("error:").red().bold(),
            build_mode
        );
        std::process::exit(1);
    });

    let link = LinkMode::parse(link_mode).unwrap_or_else(|| {
        eprintln!(
            "{} Unknown link mode: {}. Supported: static, shared",
            style("error:").red().bold(),
            link_mode
        );
        std::process::exit(1);
    });

    (build, link)
}
