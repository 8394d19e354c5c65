//! Error types for depstrap-platform

use thiserror::Error;

/// Errors that can occur in platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}
