//! jom, the parallel nmake replacement (Windows only)
//!
//! A single-tool zip with no top-level directory, so it unpacks isolated.
//! There is nothing to configure or build; install is a straight copy into
//! `bin/`. Qt's Windows build step runs this executable.

use std::path::PathBuf;

use depstrap_core::copy;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::Settings;
use depstrap_core::Result;

pub const VERSION: &str = "1.1.3";
pub const INSTALL_NAME: &str = "Jom";

pub fn executable_path(settings: &Settings) -> PathBuf {
    settings.install_root().join(INSTALL_NAME).join("bin").join("jom.exe")
}

pub fn package(settings: &Settings) -> Package {
    let file_version = VERSION.replace('.', "_");

    Package::new(
        PackageId::new("jom", VERSION),
        Source::archive(
            format!("https://download.qt.io/official_releases/jom/jom_{file_version}.zip"),
            UnpackLayout::Isolated,
        ),
        Fingerprint::from_settings(settings),
        Box::new(CopyRecipe),
    )
    .with_install_name(INSTALL_NAME)
    .with_unpack_dir(format!("jom_{file_version}"))
}

struct CopyRecipe;

impl Recipe for CopyRecipe {
    fn configure(&self, _ctx: &StageCtx<'_>) -> Result<()> {
        Ok(())
    }

    fn build(&self, _ctx: &StageCtx<'_>) -> Result<()> {
        Ok(())
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        copy::filter_copy(&ctx.src_dir, &ctx.install_dir.join("bin"), None, true)
    }
}
