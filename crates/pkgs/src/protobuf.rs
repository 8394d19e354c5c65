//! Protocol Buffers
//!
//! CMake build out of the `cmake/` subdirectory of the source tree. Installs
//! `protoc` under `bin/`, which the application's code generation step picks
//! up from this install tree.

use depstrap_core::command::Cmd;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::{LinkMode, Settings};
use depstrap_core::Result;

use crate::support::{cmake_build_type, jobs_arg};

pub const VERSION: &str = "3.6.1";
pub const INSTALL_NAME: &str = "Protobuf";

fn cmake_defines(ctx: &StageCtx<'_>) -> Vec<String> {
    let mut defines = vec![
        "-Dprotobuf_BUILD_TESTS=OFF".to_string(),
        "-Dprotobuf_BUILD_EXAMPLES=OFF".to_string(),
        "-DCMAKE_POSITION_INDEPENDENT_CODE=ON".to_string(),
        format!("-DCMAKE_BUILD_TYPE={}", cmake_build_type(ctx.settings)),
        format!("-DCMAKE_INSTALL_PREFIX={}", ctx.install_dir.display()),
    ];

    if ctx.settings.on_windows() && ctx.settings.link_mode() == LinkMode::Static {
        defines.push("-Dprotobuf_MSVC_STATIC_RUNTIME=ON".to_string());
    }

    defines
}

pub fn package(settings: &Settings) -> Package {
    let recipe: Box<dyn Recipe> = if settings.on_windows() {
        Box::new(WindowsRecipe)
    } else {
        Box::new(UnixRecipe)
    };

    Package::new(
        PackageId::new("protobuf", VERSION),
        Source::archive(
            format!("https://github.com/protocolbuffers/protobuf/archive/v{VERSION}.tar.gz"),
            UnpackLayout::CommonRoot,
        ),
        Fingerprint::from_settings(settings),
        recipe,
    )
    .with_install_name(INSTALL_NAME)
    .with_unpack_dir(format!("protobuf-{VERSION}"))
}

struct UnixRecipe;

impl Recipe for UnixRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("cmake")
            .arg(ctx.src_dir.join("cmake"))
            .args(cmake_defines(ctx))
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
            .arg(ctx.src_dir.join("cmake"))
            .args(cmake_defines(ctx))
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
