//! depstrap-pkgs: the third-party package registry
//!
//! One module per dependency, each exposing `package(&Settings) -> Package`:
//! a declarative identity + source reference paired with the build strategy
//! for the current platform. The engine treats every entry
//! identically; everything dependency-specific lives here.

pub mod bip_protocols;
pub mod botan;
pub mod chacha20poly1305;
pub mod gtest;
pub mod hidapi;
pub mod jom;
pub mod libbtc;
pub mod libqrencode;
pub mod libusb;
pub mod mpir;
pub mod nlohmann_json;
pub mod openssl;
pub mod protobuf;
pub mod qt;
pub mod registry;
pub mod spdlog;
pub mod trezor_common;
pub mod websockets;
pub mod zeromq;

mod support;

pub use registry::required_packages;
