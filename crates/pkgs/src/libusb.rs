//! libusb

use depstrap_core::command::Cmd;
use depstrap_core::copy;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::{LinkMode, Settings};
use depstrap_core::Result;

use crate::support::{cmake_build_type, jobs_arg};

pub const VERSION: &str = "1.0.23";
pub const INSTALL_NAME: &str = "Libusb";

pub fn package(settings: &Settings) -> Package {
    let recipe: Box<dyn Recipe> = if settings.on_windows() {
        Box::new(WindowsRecipe)
    } else {
        Box::new(UnixRecipe)
    };

    Package::new(
        PackageId::new("libusb", VERSION),
        Source::archive(
            format!("https://github.com/libusb/libusb/archive/v{VERSION}.tar.gz"),
            UnpackLayout::CommonRoot,
        ),
        Fingerprint::from_settings(settings),
        recipe,
    )
    .with_install_name(INSTALL_NAME)
}

struct UnixRecipe;

impl Recipe for UnixRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        copy::copy_sources_to_build(&ctx.src_dir, &ctx.build_dir)?;

        Cmd::new(ctx.build_dir.join("bootstrap.sh")).cwd(&ctx.build_dir).run()?;

        let mut cmd = Cmd::new(ctx.build_dir.join("configure"))
            .arg("--prefix")
            .arg(&ctx.install_dir);
        if ctx.settings.link_mode() == LinkMode::Static {
            cmd = cmd.arg("--disable-shared");
        }
        cmd.cwd(&ctx.build_dir).run()
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
            .arg(ctx.build_dir.join("msvc").join("libusb_static_2017.vcxproj"))
            .arg(format!("/p:Configuration={}", cmake_build_type(ctx.settings)))
            .arg("/p:Platform=x64")
            .cwd(&ctx.build_dir)
            .run()
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        let out = ctx.build_dir.join("x64").join(cmake_build_type(ctx.settings)).join("lib");

        copy::filter_copy(&out, &ctx.install_dir.join("lib"), Some(".lib"), true)?;
        copy::filter_copy(
            &ctx.src_dir.join("libusb"),
            &ctx.install_dir.join("include"),
            Some(".h"),
            true,
        )
    }
}
