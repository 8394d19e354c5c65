//! Small helpers shared by the descriptors.

use depstrap_core::settings::{BuildMode, Settings};

/// CMake configuration name for the current build mode.
pub(crate) fn cmake_build_type(settings: &Settings) -> &'static str {
    match settings.build_mode() {
        BuildMode::Debug => "Debug",
        BuildMode::Release => "Release",
    }
}

/// `-j` degree for make-style tools, as a string argument.
pub(crate) fn jobs_arg(settings: &Settings) -> String {
    settings.jobs().to_string()
}
