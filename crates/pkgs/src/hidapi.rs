//! HIDAPI, USB HID access for the hardware wallet integrations.

use depstrap_core::command::Cmd;
use depstrap_core::copy;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::Settings;
use depstrap_core::Result;

use crate::support::{cmake_build_type, jobs_arg};

pub const VERSION: &str = "0.9.0";
pub const INSTALL_NAME: &str = "HIDAPI";

pub fn package(settings: &Settings) -> Package {
    let recipe: Box<dyn Recipe> = if settings.on_windows() {
        Box::new(WindowsRecipe)
    } else {
        Box::new(UnixRecipe)
    };

    Package::new(
        PackageId::new("hidapi", VERSION),
        Source::archive(
            format!("https://github.com/libusb/hidapi/archive/hidapi-{VERSION}.tar.gz"),
            UnpackLayout::CommonRoot,
        ),
        Fingerprint::from_settings(settings),
        recipe,
    )
    .with_install_name(INSTALL_NAME)
    .with_unpack_dir(format!("hidapi-hidapi-{VERSION}"))
}

struct UnixRecipe;

impl Recipe for UnixRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        copy::copy_sources_to_build(&ctx.src_dir, &ctx.build_dir)?;

        Cmd::new(ctx.build_dir.join("bootstrap")).cwd(&ctx.build_dir).run()?;

        Cmd::new(ctx.build_dir.join("configure"))
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
        copy::copy_sources_to_build(&ctx.src_dir, &ctx.build_dir)?;
        Ok(())
    }

    fn build(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("msbuild")
            .arg(ctx.build_dir.join("windows").join("hidapi.vcxproj"))
            .arg(format!("/p:Configuration={}", cmake_build_type(ctx.settings)))
            .arg("/p:Platform=x64")
            .cwd(&ctx.build_dir)
            .run()
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        let out = ctx.build_dir.join("windows").join("x64").join(cmake_build_type(ctx.settings));

        copy::filter_copy(&out, &ctx.install_dir.join("lib"), Some(".lib"), true)?;
        copy::filter_copy(
            &ctx.src_dir.join("hidapi"),
            &ctx.install_dir.join("include"),
            Some(".h"),
            true,
        )
    }
}
