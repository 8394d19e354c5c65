//! The ordered list of required packages.
//!
//! Declaration order is load-bearing: a package whose configure stage
//! references another package's install tree must come after it. Qt links
//! our OpenSSL and builds with jom on Windows; libwebsockets links our
//! OpenSSL as well.

use depstrap_core::package::Package;
use depstrap_core::settings::Settings;
use tracing::debug;

use crate::{
    bip_protocols, botan, chacha20poly1305, gtest, hidapi, jom, libbtc, libqrencode, libusb, mpir,
    nlohmann_json, openssl, protobuf, qt, spdlog, trezor_common, websockets, zeromq,
};

/// Build the package list for one run.
///
/// Each package is constructed fresh against the given settings; nothing
/// here is cached across runs.
pub fn required_packages(settings: &Settings, with_tests: bool) -> Vec<Package> {
    let mut packages = Vec::new();

    if settings.on_windows() {
        packages.push(jom::package(settings));
    }

    packages.push(protobuf::package(settings));
    packages.push(openssl::package(settings));
    packages.push(spdlog::package(settings));
    packages.push(zeromq::package(settings));
    packages.push(libqrencode::package(settings));
    packages.push(mpir::package(settings));
    packages.push(libbtc::package(settings));
    packages.push(chacha20poly1305::package(settings));
    packages.push(websockets::package(settings));
    packages.push(botan::package(settings));
    packages.push(qt::package(settings));
    packages.push(hidapi::package(settings));
    packages.push(libusb::package(settings));
    packages.push(trezor_common::package(settings));
    packages.push(bip_protocols::package(settings));
    packages.push(nlohmann_json::package(settings));

    if with_tests {
        packages.push(gtest::package(settings));
    }

    debug!(count = packages.len(), "registry assembled");
    packages
}
