use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

/// depstrap - third-party dependency bootstrap
#[derive(Parser)]
#[command(name = "depstrap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, build and install every required package
    Build {
        /// Build mode [ debug | release ]
        #[arg(default_value = "release")]
        build_mode: String,

        /// Link mode [ static | shared ]
        #[arg(default_value = "static")]
        link_mode: String,

        /// Also install the test-only packages (gtest)
        #[arg(long)]
        with_tests: bool,
    },

    /// Print the ordered package list without building anything
    List {
        /// Build mode [ debug | release ]
        #[arg(default_value = "release")]
        build_mode: String,

        /// Link mode [ static | shared ]
        #[arg(default_value = "static")]
        link_mode: String,

        /// Also list the test-only packages (gtest)
        #[arg(long)]
        with_tests: bool,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved platform and cache locations
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; --verbose raises the default filter.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).without_time().init();

    match cli.command {
        Commands::Build {
            build_mode,
            link_mode,
            with_tests,
        } => cmd::cmd_build(&build_mode, &link_mode, with_tests),
        Commands::List {
            build_mode,
            link_mode,
            with_tests,
            json,
        } => cmd::cmd_list(&build_mode, &link_mode, with_tests, json),
        Commands::Status => cmd::cmd_status(),
    }
}
