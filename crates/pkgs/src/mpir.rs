//! MPIR
//!
//! Autotools on unix; on Windows the shipped Visual Studio solution builds
//! in-source and the install tree is assembled by filtered copies.

use depstrap_core::command::Cmd;
use depstrap_core::copy;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::Settings;
use depstrap_core::Result;

use crate::support::{cmake_build_type, jobs_arg};

pub const VERSION: &str = "3.0.0";
pub const INSTALL_NAME: &str = "MPIR";

const UNIX_CONFIGURE_ARGS: &[&str] = &["--enable-cxx", "--enable-gmpcompat"];

pub fn package(settings: &Settings) -> Package {
    let recipe: Box<dyn Recipe> = if settings.on_windows() {
        Box::new(WindowsRecipe)
    } else {
        Box::new(UnixRecipe)
    };

    Package::new(
        PackageId::new("mpir", VERSION),
        Source::archive(
            format!("https://github.com/wbhart/mpir/archive/mpir-{VERSION}.tar.gz"),
            UnpackLayout::CommonRoot,
        ),
        Fingerprint::compute(settings, UNIX_CONFIGURE_ARGS.iter().copied()),
        recipe,
    )
    .with_install_name(INSTALL_NAME)
    // GitHub tag archives unpack to <repo>-<tag>.
    .with_unpack_dir(format!("mpir-mpir-{VERSION}"))
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
        // The VS solution carries its own configuration; build runs in-source.
        copy::copy_sources_to_build(&ctx.src_dir, &ctx.build_dir)?;
        Ok(())
    }

    fn build(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("msbuild")
            .arg(
                ctx.build_dir
                    .join("build.vc15")
                    .join("lib_mpir_gc")
                    .join("lib_mpir_gc.vcxproj"),
            )
            .arg(format!("/p:Configuration={}", cmake_build_type(ctx.settings)))
            .arg("/p:Platform=x64")
            .cwd(&ctx.build_dir)
            .run()
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        let out = ctx
            .build_dir
            .join("lib")
            .join("x64")
            .join(cmake_build_type(ctx.settings));

        copy::filter_copy(&out, &ctx.install_dir.join("lib"), Some(".lib"), true)?;
        copy::filter_copy(&out, &ctx.install_dir.join("include"), Some(".h"), true)
    }
}
