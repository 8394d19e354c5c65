//! libwebsockets
//!
//! Links against our own OpenSSL install tree, so it must appear after
//! openssl in the registry order.

use depstrap_core::command::Cmd;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::{LinkMode, Settings};
use depstrap_core::Result;

use crate::openssl;
use crate::support::cmake_build_type;

pub const VERSION: &str = "3.2.0";
pub const INSTALL_NAME: &str = "Websockets";

fn cmake_defines(ctx: &StageCtx<'_>) -> Vec<String> {
    let settings = ctx.settings;
    let ssl_root = openssl::install_dir(settings);
    let ssl_lib = ssl_root.join("lib");

    let libraries = if settings.on_windows() {
        format!(
            "{};{}",
            ssl_lib.join("libssl.lib").display(),
            ssl_lib.join("libcrypto.lib").display()
        )
    } else {
        format!(
            "{};{}",
            ssl_lib.join("libssl.a").display(),
            ssl_lib.join("libcrypto.a").display()
        )
    };

    let mut defines = vec![
        "-DLWS_WITH_SSL=ON".to_string(),
        "-DLWS_WITHOUT_TESTAPPS=ON".to_string(),
        "-DLWS_WITHOUT_TEST_SERVER=ON".to_string(),
        "-DLWS_WITHOUT_TEST_CLIENT=ON".to_string(),
        "-DLWS_WITH_LIBUV=OFF".to_string(),
        format!("-DLWS_OPENSSL_INCLUDE_DIRS={}", ssl_root.join("include").display()),
        format!("-DLWS_OPENSSL_LIBRARIES={libraries}"),
        format!("-DCMAKE_BUILD_TYPE={}", cmake_build_type(settings)),
        format!("-DCMAKE_INSTALL_PREFIX={}", ctx.install_dir.display()),
    ];

    if settings.link_mode() == LinkMode::Static {
        defines.push("-DLWS_WITH_SHARED=OFF".to_string());
        if settings.on_windows() {
            defines.push("-DLWS_STATIC_PIC=ON".to_string());
        }
    }

    defines
}

pub fn package(settings: &Settings) -> Package {
    Package::new(
        PackageId::new("websockets", VERSION),
        Source::archive(
            format!("https://github.com/warmcat/libwebsockets/archive/v{VERSION}.tar.gz"),
            UnpackLayout::CommonRoot,
        ),
        Fingerprint::from_settings(settings),
        Box::new(CMakeRecipe),
    )
    .with_install_name(INSTALL_NAME)
    .with_unpack_dir(format!("libwebsockets-{VERSION}"))
}

struct CMakeRecipe;

impl Recipe for CMakeRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("cmake")
            .arg(&ctx.src_dir)
            .args(cmake_defines(ctx))
            .cwd(&ctx.build_dir)
            .run()
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
