//! nlohmann/json, header-only.
//!
//! The release ships a bare `include/` zip with no top-level directory, so
//! it unpacks isolated; install is a filtered header copy.

use depstrap_core::copy;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::Settings;
use depstrap_core::Result;

pub const VERSION: &str = "3.7.3";
pub const INSTALL_NAME: &str = "NlohmannJson";

pub fn package(settings: &Settings) -> Package {
    Package::new(
        PackageId::new("nlohmann-json", VERSION),
        Source::archive(
            format!("https://github.com/nlohmann/json/releases/download/v{VERSION}/include.zip"),
            UnpackLayout::Isolated,
        ),
        Fingerprint::from_settings(settings),
        Box::new(HeaderCopyRecipe),
    )
    .with_install_name(INSTALL_NAME)
    .with_unpack_dir(format!("nlohmann-json-{VERSION}"))
}

struct HeaderCopyRecipe;

impl Recipe for HeaderCopyRecipe {
    fn configure(&self, _ctx: &StageCtx<'_>) -> Result<()> {
        Ok(())
    }

    fn build(&self, _ctx: &StageCtx<'_>) -> Result<()> {
        Ok(())
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        copy::filter_copy(
            &ctx.src_dir.join("include"),
            &ctx.install_dir.join("include"),
            Some(".hpp"),
            true,
        )
    }
}
