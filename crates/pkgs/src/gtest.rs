//! GoogleTest, only pulled in when the application's tests are requested.

use depstrap_core::command::Cmd;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::{LinkMode, Settings};
use depstrap_core::Result;

use crate::support::cmake_build_type;

pub const VERSION: &str = "1.8.1";
pub const INSTALL_NAME: &str = "Gtest";

pub fn package(settings: &Settings) -> Package {
    Package::new(
        PackageId::new("gtest", VERSION),
        Source::archive(
            format!("https://github.com/google/googletest/archive/release-{VERSION}.tar.gz"),
            UnpackLayout::CommonRoot,
        ),
        Fingerprint::from_settings(settings),
        Box::new(CMakeRecipe),
    )
    .with_install_name(INSTALL_NAME)
    .with_unpack_dir(format!("googletest-release-{VERSION}"))
}

struct CMakeRecipe;

impl Recipe for CMakeRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        let mut cmd = Cmd::new("cmake")
            .arg(&ctx.src_dir)
            .arg(format!("-DCMAKE_BUILD_TYPE={}", cmake_build_type(ctx.settings)))
            .arg(format!("-DCMAKE_INSTALL_PREFIX={}", ctx.install_dir.display()));

        // Match the application's static CRT when everything links static.
        if ctx.settings.on_windows() && ctx.settings.link_mode() == LinkMode::Static {
            cmd = cmd.arg("-Dgtest_force_shared_crt=OFF");
        } else {
            cmd = cmd.arg("-Dgtest_force_shared_crt=ON");
        }

        cmd.cwd(&ctx.build_dir).run()
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
