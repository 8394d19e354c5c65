//! depstrap-core: the dependency-build orchestration engine
//!
//! This crate implements the generic pipeline every third-party package
//! definition plugs into:
//! - `Settings`: process-wide build configuration and directory layout
//! - `Package`/`Recipe`: declarative identity + platform-selected build steps
//! - `pipeline`: the download → extract → configure → build → install → stamp
//!   sequence, gated by the revision stamp
//! - `orchestrator`: sequential execution over an ordered package list,
//!   stopping at the first failure

pub mod command;
pub mod copy;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod fingerprint;
pub mod orchestrator;
pub mod package;
pub mod pipeline;
pub mod settings;
pub mod stamp;

pub use error::CoreError;

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, CoreError>;
