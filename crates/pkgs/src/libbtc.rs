//! libbtc, always linked statically.

use depstrap_core::command::Cmd;
use depstrap_core::copy;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::Settings;
use depstrap_core::Result;

use crate::support::{cmake_build_type, jobs_arg};

pub const VERSION: &str = "0.1";
pub const INSTALL_NAME: &str = "LibBTC";

const UNIX_CONFIGURE_ARGS: &[&str] = &["--disable-wallet", "--disable-net", "--disable-shared"];

pub fn package(settings: &Settings) -> Package {
    let recipe: Box<dyn Recipe> = if settings.on_windows() {
        Box::new(WindowsRecipe)
    } else {
        Box::new(UnixRecipe)
    };

    Package::new(
        PackageId::new("libbtc", VERSION),
        Source::archive(
            format!("https://github.com/libbtc/libbtc/archive/v{VERSION}.tar.gz"),
            UnpackLayout::CommonRoot,
        ),
        Fingerprint::compute(settings, UNIX_CONFIGURE_ARGS.iter().copied()),
        recipe,
    )
    .with_install_name(INSTALL_NAME)
}

struct UnixRecipe;

impl Recipe for UnixRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        copy::copy_sources_to_build(&ctx.src_dir, &ctx.build_dir)?;

        Cmd::new(ctx.build_dir.join("autogen.sh")).cwd(&ctx.build_dir).run()?;

        Cmd::new(ctx.build_dir.join("configure"))
            .args(UNIX_CONFIGURE_ARGS)
            .arg("--prefix")
            .arg(&ctx.install_dir)
            .cwd(&ctx.build_dir)
            .run()
    }

    fn build(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("make")
            .arg("-j")
            .arg(jobs_arg(ctx.settings))
            .cwd(&ctx.build_dir)
            .run()
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("make").arg("install").cwd(&ctx.build_dir).run()
    }
}

struct WindowsRecipe;

impl Recipe for WindowsRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("cmake")
            .arg(&ctx.src_dir)
            .arg("-DWITH_WALLET=OFF")
            .arg("-DWITH_NET=OFF")
            .arg(format!("-DCMAKE_INSTALL_PREFIX={}", ctx.install_dir.display()))
            .cwd(&ctx.build_dir)
            .run()
    }

    fn build(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("cmake")
            .arg("--build")
            .arg(".")
            .arg("--config")
            .arg(cmake_build_type(ctx.settings))
            .cwd(&ctx.build_dir)
            .run()
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        // The upstream CMake lists no install target; assemble the tree by hand.
        let cfg_dir = ctx.build_dir.join(cmake_build_type(ctx.settings));
        copy::filter_copy(&cfg_dir, &ctx.install_dir.join("lib"), Some(".lib"), true)?;
        copy::filter_copy(&ctx.src_dir.join("include"), &ctx.install_dir.join("include"), Some(".h"), true)
    }
}
