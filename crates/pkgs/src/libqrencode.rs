//! libqrencode

use depstrap_core::command::Cmd;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::Settings;
use depstrap_core::Result;

use crate::support::cmake_build_type;

pub const VERSION: &str = "4.0.2";
pub const INSTALL_NAME: &str = "LibQREncode";

const CMAKE_OPTIONS: &[&str] = &["-DWITH_TOOLS=NO", "-DWITHOUT_PNG=ON"];

pub fn package(settings: &Settings) -> Package {
    Package::new(
        PackageId::new("libqrencode", VERSION),
        Source::archive(
            format!("https://github.com/fukuchi/libqrencode/archive/v{VERSION}.tar.gz"),
            UnpackLayout::CommonRoot,
        ),
        Fingerprint::compute(settings, CMAKE_OPTIONS.iter().copied()),
        Box::new(CMakeRecipe),
    )
    .with_install_name(INSTALL_NAME)
}

struct CMakeRecipe;

impl Recipe for CMakeRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("cmake")
            .arg(&ctx.src_dir)
            .args(CMAKE_OPTIONS)
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
