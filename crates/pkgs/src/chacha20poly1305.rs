//! libchacha20poly1305, pinned to an exact commit (no upstream releases).

use depstrap_core::command::Cmd;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::Settings;
use depstrap_core::Result;

use crate::support::cmake_build_type;

pub const REV: &str = "4fc8f816c6bba44f6a87f7e93c26c1c6b1c3a7a2";
pub const INSTALL_NAME: &str = "Chacha20Poly1305";

pub fn package(settings: &Settings) -> Package {
    let short_rev = &REV[..8];

    Package::new(
        PackageId::new("libchacha20poly1305", short_rev),
        Source::Git {
            url: "https://github.com/grigorig/chachapoly.git".to_string(),
            rev: REV.to_string(),
        },
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
