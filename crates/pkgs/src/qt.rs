//! Qt
//!
//! By far the heaviest dependency. The configure step trims the build down
//! to what the application actually links: most modules and SQL drivers are
//! skipped, and OpenSSL is linked in from our own install tree rather than
//! whatever the system carries.

use std::path::PathBuf;

use depstrap_core::command::Cmd;
use depstrap_core::extract::UnpackLayout;
use depstrap_core::fingerprint::Fingerprint;
use depstrap_core::package::{Package, PackageId, Recipe, Source, StageCtx};
use depstrap_core::settings::{BuildMode, LinkMode, Settings};
use depstrap_core::Result;

use crate::support::jobs_arg;
use crate::{jom, openssl};

pub const RELEASE: &str = "5.12";
pub const VERSION: &str = "5.12.5";
pub const INSTALL_NAME: &str = "Qt5";

const MODULES_TO_SKIP: &[&str] = &[
    "doc",
    "webengine",
    "webchannel",
    "webview",
    "sensors",
    "serialport",
    "script",
    "multimedia",
    "wayland",
    "location",
    "webglplugin",
    "gamepad",
    "purchasing",
    "canvas3d",
    "speech",
    "3d",
    "androidextras",
    "connectivity",
    "virtualkeyboard",
];

const SQL_DRIVERS_TO_SKIP: &[&str] = &["db2", "oci", "tds", "sqlite2", "odbc", "ibase", "psql", "mysql"];

fn package_dir() -> String {
    format!("qt-everywhere-src-{VERSION}")
}

pub fn package(settings: &Settings) -> Package {
    let url = if settings.on_windows() {
        format!(
            "https://download.qt.io/official_releases/qt/{RELEASE}/{VERSION}/single/{}.zip",
            package_dir()
        )
    } else {
        format!(
            "https://download.qt.io/official_releases/qt/{RELEASE}/{VERSION}/single/{}.tar.xz",
            package_dir()
        )
    };

    let recipe: Box<dyn Recipe> = if settings.on_windows() {
        Box::new(WindowsRecipe)
    } else {
        Box::new(UnixRecipe)
    };

    // The skip lists shape the produced artifact as much as the version
    // does; fold them into the cache key.
    let mut inputs: Vec<&str> = MODULES_TO_SKIP.to_vec();
    inputs.extend_from_slice(SQL_DRIVERS_TO_SKIP);

    Package::new(
        PackageId::new("qt", VERSION),
        Source::archive(url, UnpackLayout::CommonRoot),
        Fingerprint::compute(settings, inputs),
        recipe,
    )
    .with_install_name(INSTALL_NAME)
    .with_unpack_dir(package_dir())
}

/// Flags shared between the platform variants.
fn common_configure_args(ctx: &StageCtx<'_>) -> Vec<String> {
    let settings = ctx.settings;
    let mut args: Vec<String> = Vec::new();

    match settings.build_mode() {
        BuildMode::Release => {
            args.push("-release".into());
            args.push("-no-qml-debug".into());
        }
        BuildMode::Debug => args.push("-debug".into()),
    }

    if settings.on_linux() {
        args.push("-dbus".into());
    } else {
        args.push("-no-dbus".into());
    }

    if settings.link_mode() == LinkMode::Static {
        args.push("-static".into());
        args.push("-openssl-linked".into());
        if settings.on_windows() {
            args.push("-static-runtime".into());
        }
        args.push("-skip".into());
        args.push("imageformats".into());
    }

    args.extend(
        [
            "-confirm-license",
            "-opensource",
            "-no-opengl",
            "-qt-pcre",
            "-qt-harfbuzz",
            "-sql-sqlite",
            "-no-feature-vulkan",
            "-silent",
        ]
        .map(String::from),
    );

    args.push(format!("-I{}", openssl::install_dir(settings).join("include").display()));

    if settings.on_linux() {
        args.extend(
            [
                "-system-freetype",
                "-fontconfig",
                "-no-glib",
                "-cups",
                "-no-icu",
                "-nomake",
                "tools",
            ]
            .map(String::from),
        );
    } else {
        args.push("-qt-libpng".into());
        args.push("-no-freetype".into());
    }

    args.extend(["-nomake", "tests", "-nomake", "examples"].map(String::from));

    for driver in SQL_DRIVERS_TO_SKIP {
        args.push(format!("-no-sql-{driver}"));
    }

    for module in MODULES_TO_SKIP {
        args.push("-skip".into());
        args.push((*module).into());
    }

    args.push("-prefix".into());
    args.push(ctx.install_dir.display().to_string());

    args
}

/// OPENSSL_* variables for `-openssl-linked`, pointing configure at our own
/// OpenSSL install.
fn openssl_env(settings: &Settings) -> Vec<(String, String)> {
    let ssl_root = openssl::install_dir(settings);
    let lib_dir: PathBuf = ssl_root.join("lib");

    let mut libs = format!("-L{} -lssl -lcrypto", lib_dir.display());
    if settings.on_linux() {
        libs.push_str(" -ldl -lpthread");
    } else if settings.on_windows() {
        libs.push_str(" -lUser32 -lAdvapi32 -lGdi32 -lCrypt32 -lws2_32");
    }

    vec![
        ("OPENSSL_DIR".to_string(), ssl_root.display().to_string()),
        ("OPENSSL_LIBS".to_string(), libs),
        (
            "OPENSSL_INCLUDE".to_string(),
            ssl_root.join("include").display().to_string(),
        ),
    ]
}

struct UnixRecipe;

impl Recipe for UnixRecipe {
    fn configure(&self, ctx: &StageCtx<'_>) -> Result<()> {
        let mut cmd = Cmd::new(ctx.src_dir.join("configure"))
            .args(common_configure_args(ctx))
            .cwd(&ctx.build_dir);
        for (key, value) in openssl_env(ctx.settings) {
            cmd = cmd.env(key, value);
        }
        cmd.run()
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
        let mut cmd = Cmd::new(ctx.src_dir.join("configure.bat"))
            .arg("-platform")
            .arg("win32-msvc")
            .args(common_configure_args(ctx))
            .cwd(&ctx.build_dir);
        for (key, value) in openssl_env(ctx.settings) {
            cmd = cmd.env(key, value);
        }
        cmd.run()
    }

    fn build(&self, ctx: &StageCtx<'_>) -> Result<()> {
        let mut cmd = Cmd::new(jom::executable_path(ctx.settings)).cwd(&ctx.build_dir);
        if ctx.settings.link_mode() == LinkMode::Static {
            cmd = cmd.arg("mode=static");
        }
        cmd.run()
    }

    fn install(&self, ctx: &StageCtx<'_>) -> Result<()> {
        Cmd::new("nmake").arg("install").cwd(&ctx.build_dir).run()
    }
}
