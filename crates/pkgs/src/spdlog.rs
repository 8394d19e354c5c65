//! spdlog
//!
//! Header-mostly logging library; the CMake invocation is identical on all
//! platforms, so a single recipe serves both.

use depstrap_core::command::Cmd;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::Settings;
use depstrap_core::Result;

use crate::support::cmake_build_type;

pub const VERSION: &str = "1.3.1";
pub const INSTALL_NAME: &str = "Spdlog";

pub fn package(settings: &Settings) -> Package {
    Package::new(
        PackageId::new("spdlog", VERSION),
        Source::archive(
            format!("https://github.com/gabime/spdlog/archive/v{VERSION}.tar.gz"),
            UnpackLayout::CommonRoot,
        ),
        Fingerprint::from_settings(settings),
        Box::new(CMakeRecipe),
    )
    .with_install_name(INSTALL_NAME)
}

struct CMakeRecipe;

impl Recipe for CMakeRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("cmake")
            .arg(&ctx.src_dir)
            .arg("-DSPDLOG_BUILD_EXAMPLES=OFF")
            .arg("-DSPDLOG_BUILD_BENCH=OFF")
            .arg("-DSPDLOG_BUILD_TESTS=OFF")
            .arg(format!("-DCMAKE_BUILD_TYPE={}", cmake_build_type(ctx.settings)))
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
        Cmd::new("cmake")
            .arg("--build")
            .arg(".")
            .arg("--config")
            .arg(cmake_build_type(ctx.settings))
            .arg("--target")
            .arg("install")
            .cwd(&ctx.build_dir)
            .run()
    }
}
