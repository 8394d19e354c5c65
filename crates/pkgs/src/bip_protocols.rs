//! bip-protocols, message and schema definitions for the settlement flows.
//!
//! Same shape as trezor-common: a pinned checkout whose definition files are
//! copied straight into the install tree. The `.proto` and `.sql` files land
//! in one directory, so the second copy must not clear the first.

use depstrap_core::copy;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::Settings;
use depstrap_core::Result;

pub const REV: &str = "c2b17f0a5dd84e9356aa7e0ee1c2c49033d256c1";
pub const INSTALL_NAME: &str = "BipProtocols";

pub fn package(settings: &Settings) -> Package {
    let short_rev = &REV[..8];

    Package::new(
        PackageId::new("bip-protocols", short_rev),
        Source::Git {
            url: "https://github.com/bip-protocols/bip-protocols.git".to_string(),
            rev: REV.to_string(),
        },
        Fingerprint::from_settings(settings),
        Box::new(DefinitionCopyRecipe),
    )
    .with_install_name(INSTALL_NAME)
}

struct DefinitionCopyRecipe;

impl Recipe for DefinitionCopyRecipe {
    fn configure(&self, _ctx: &StageCtx<'_>) -> Result<()> {
        Ok(())
    }

    fn build(&self, _ctx: &StageCtx<'_>) -> Result<()> {
        Ok(())
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        let dest = ctx.install_dir.join("protob");
        copy::filter_copy(&ctx.src_dir, &dest, Some(".proto"), true)?;
        copy::filter_copy(&ctx.src_dir, &dest, Some(".sql"), false)
    }
}
