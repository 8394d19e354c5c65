//! Platform detection and cache-root resolution for depstrap
//!
//! This crate provides the small platform layer the engine sits on:
//! - OS detection (resolved once at startup)
//! - Resolution of the third-party cache roots, with environment overrides
//!   so multiple checkouts can share one dependency cache

mod error;
mod paths;
mod platform;

pub use error::PlatformError;
pub use paths::{DOWNLOADS_DIR_ENV, THIRD_PARTY_ROOT_ENV, downloads_dir, project_root, third_party_root};
pub use platform::Os;
