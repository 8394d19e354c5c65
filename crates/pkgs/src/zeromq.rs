//! ZeroMQ
//!
//! Unix builds use the release tarball (ships a pre-generated configure, so
//! only autogen + configure + make is needed); Windows builds use the
//! repository zip through CMake with a static-CRT flag set.

use std::fs;

use depstrap_core::command::Cmd;
use depstrap_core::copy;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::{BuildMode, LinkMode, Settings};
use depstrap_core::Result;

use crate::support::{cmake_build_type, jobs_arg};

pub const VERSION: &str = "4.3.2";
pub const INSTALL_NAME: &str = "ZeroMQ";

const UNIX_CONFIGURE_ARGS: &[&str] = &["--enable-libunwind=no", "--verbose", "--without-libsodium"];

pub fn package(settings: &Settings) -> Package {
    let (unpack_dir, url) = if settings.on_windows() {
        (
            format!("libzmq-{VERSION}"),
            format!("https://github.com/zeromq/libzmq/archive/v{VERSION}.zip"),
        )
    } else {
        // Release source package, simply to avoid a full reconfigure.
        (
            format!("zeromq-{VERSION}"),
            format!("https://github.com/zeromq/libzmq/releases/download/v{VERSION}/zeromq-{VERSION}.tar.gz"),
        )
    };

    let recipe: Box<dyn Recipe> = if settings.on_windows() {
        Box::new(WindowsRecipe)
    } else {
        Box::new(UnixRecipe)
    };

    Package::new(
        PackageId::new("zeromq", VERSION),
        Source::archive(url, UnpackLayout::CommonRoot),
        Fingerprint::compute(settings, UNIX_CONFIGURE_ARGS.iter().copied()),
        recipe,
    )
    .with_install_name(INSTALL_NAME)
    .with_unpack_dir(unpack_dir)
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
        patch_cmake_definitions(ctx)?;

        let mut cmd = Cmd::new("cmake")
            .arg(&ctx.src_dir)
            .arg("-DZMQ_BUILD_TESTS=OFF")
            .arg(format!("-DCMAKE_INSTALL_PREFIX={}", ctx.install_dir.display()));

        if ctx.settings.link_mode() == LinkMode::Shared {
            cmd = cmd.arg("-DBUILD_STATIC=OFF");
        } else {
            // Static CRT so the library links into the statically built
            // application without runtime mismatches.
            cmd = match ctx.settings.build_mode() {
                BuildMode::Debug => cmd
                    .arg("-DCMAKE_C_FLAGS_DEBUG=/D_DEBUG /MTd /Zi /Ob0 /Od /RTC1")
                    .arg("-DCMAKE_CXX_FLAGS_DEBUG=/D_DEBUG /MTd /Zi /Ob0 /Od /RTC1"),
                BuildMode::Release => cmd
                    .arg("-DCMAKE_C_FLAGS_RELEASE=/MT /O2 /Ob2 /D NDEBUG")
                    .arg("-DCMAKE_CXX_FLAGS_RELEASE=/MT /O2 /Ob2 /D NDEBUG"),
            };
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

/// The upstream CMakeLists hard-enables tweetnacl/curve via `set()`, which
/// does not reach the compiler on MSVC; turn those into definitions.
fn patch_cmake_definitions(ctx: &StageCtx<'_>) -> Result<()> {
    let cmake_file = ctx.src_dir.join("CMakeLists.txt");
    let content = fs::read_to_string(&cmake_file)?;
    let patched = content
        .replace("set (ZMQ_USE_TWEETNACL 1)", "ADD_DEFINITIONS(-DZMQ_USE_TWEETNACL)")
        .replace("set (ZMQ_HAVE_CURVE 1)", "ADD_DEFINITIONS(-DZMQ_HAVE_CURVE)")
        .replace("set (ZMQ_USE_LIBSODIUM 1)", "ADD_DEFINITIONS(-DZMQ_USE_LIBSODIUM)");
    fs::write(&cmake_file, patched)?;
    Ok(())
}
