//! Botan
//!
//! Ships as `.tar.xz` and configures with its own Python script, in-source.

use depstrap_core::command::Cmd;
use depstrap_core::copy;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::{BuildMode, LinkMode, Settings};
use depstrap_core::Result;

use crate::support::jobs_arg;

pub const VERSION: &str = "2.11.0";
pub const INSTALL_NAME: &str = "Botan";

fn configure_args(ctx: &StageCtx<'_>) -> Vec<String> {
    let mut args = vec![
        format!("--prefix={}", ctx.install_dir.display()),
        "--without-documentation".to_string(),
    ];
    if ctx.settings.link_mode() == LinkMode::Static {
        args.push("--disable-shared".to_string());
    }
    if ctx.settings.build_mode() == BuildMode::Debug {
        args.push("--debug-mode".to_string());
    }
    args
}

pub fn package(settings: &Settings) -> Package {
    let recipe: Box<dyn Recipe> = if settings.on_windows() {
        Box::new(WindowsRecipe)
    } else {
        Box::new(UnixRecipe)
    };

    Package::new(
        PackageId::new("botan", VERSION),
        Source::archive(
            format!("https://botan.randombit.net/releases/Botan-{VERSION}.tar.xz"),
            UnpackLayout::CommonRoot,
        ),
        Fingerprint::compute(settings, ["--without-documentation"]),
        recipe,
    )
    .with_install_name(INSTALL_NAME)
    .with_unpack_dir(format!("Botan-{VERSION}"))
}

struct UnixRecipe;

impl Recipe for UnixRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        copy::copy_sources_to_build(&ctx.src_dir, &ctx.build_dir)?;

        Cmd::new("python3")
            .arg(ctx.build_dir.join("configure.py"))
            .args(configure_args(ctx))
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
        copy::copy_sources_to_build(&ctx.src_dir, &ctx.build_dir)?;

        Cmd::new("python")
            .arg(ctx.build_dir.join("configure.py"))
            .arg("--cc=msvc")
            .arg("--os=windows")
            .args(configure_args(ctx))
            .cwd(&ctx.build_dir)
            .run()
    }

    fn build(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("nmake").cwd(&ctx.build_dir).run()
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("nmake").arg("install").cwd(&ctx.build_dir).run()
    }
}
