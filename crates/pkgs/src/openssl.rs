//! OpenSSL
//!
//! Builds in-source, so the unpacked tree is copied into the scratch build
//! directory first. Several later packages (Qt, libwebsockets) link against
//! this install tree and therefore come after it in the registry order.

use std::path::PathBuf;

use depstrap_core::command::Cmd;
use depstrap_core::copy;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::{LinkMode, Settings};
use depstrap_core::Result;

use crate::support::jobs_arg;

pub const VERSION: &str = "1.1.1g";
pub const INSTALL_NAME: &str = "OpenSSL";

/// Install tree other descriptors link against.
pub fn install_dir(settings: &Settings) -> PathBuf {
    settings.install_root().join(INSTALL_NAME)
}

fn configure_args(settings: &Settings) -> Vec<String> {
    let mut args = vec!["no-comp".to_string(), "no-tests".to_string()];
    if settings.link_mode() == LinkMode::Static {
        args.push("no-shared".to_string());
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
        PackageId::new("openssl", VERSION),
        Source::archive(
            format!("https://www.openssl.org/source/openssl-{VERSION}.tar.gz"),
            UnpackLayout::CommonRoot,
        ),
        Fingerprint::compute(settings, configure_args(settings)),
        recipe,
    )
    .with_install_name(INSTALL_NAME)
}

struct UnixRecipe;

impl Recipe for UnixRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        copy::copy_sources_to_build(&ctx.src_dir, &ctx.build_dir)?;

        Cmd::new(ctx.build_dir.join("config"))
            .arg(format!("--prefix={}", ctx.install_dir.display()))
            .args(configure_args(ctx.settings))
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
        // install_sw skips the man pages, which take longer than the build.
        Cmd::new("make").arg("install_sw").cwd(&ctx.build_dir).run()
    }
}

struct WindowsRecipe;

impl Recipe for WindowsRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        copy::copy_sources_to_build(&ctx.src_dir, &ctx.build_dir)?;

        Cmd::new("perl")
            .arg("Configure")
            .arg("VC-WIN64A")
            .arg(format!("--prefix={}", ctx.install_dir.display()))
            .args(configure_args(ctx.settings))
            .cwd(&ctx.build_dir)
            .run()
    }

    fn build(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("nmake").cwd(&ctx.build_dir).run()
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("nmake").arg("install_sw").cwd(&ctx.build_dir).run()
    }
}
