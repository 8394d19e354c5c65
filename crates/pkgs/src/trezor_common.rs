//! trezor-common, the protobuf definitions shared with the Trezor firmware.
//!
//! Nothing compiles here: the pinned checkout's `.proto` files are copied
//! into the install tree and consumed by the application's protoc step.

use depstrap_core::copy;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::Settings;
use depstrap_core::Result;

pub const REV: &str = "a5a32e92db9ff33b4b20d7c2713a1373d0ef8d9b";
pub const INSTALL_NAME: &str = "TrezorCommon";

pub fn package(settings: &Settings) -> Package {
    let short_rev = &REV[..8];

    Package::new(
        PackageId::new("trezor-common", short_rev),
        Source::Git {
            url: "https://github.com/trezor/trezor-common.git".to_string(),
            rev: REV.to_string(),
        },
        Fingerprint::from_settings(settings),
        Box::new(ProtoCopyRecipe),
    )
    .with_install_name(INSTALL_NAME)
}

struct ProtoCopyRecipe;

impl Recipe for ProtoCopyRecipe {
    fn configure(&self, _ctx: &StageCtx<'_>) -> Result<()> {
        Ok(())
    }

    fn build(&self, _ctx: &StageCtx<'_>) -> Result<()> {
        Ok(())
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        copy::filter_copy(
            &ctx.src_dir.join("protob"),
            &ctx.install_dir.join("protob"),
            Some(".proto"),
            true,
        )
    }
}
