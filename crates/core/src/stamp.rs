//! Revision stamp: the durable half of the incremental cache
//!
//! A package's install directory carries a single stamp file whose content
//! is the exact revision that was last installed successfully. The stamp is
//! the only state that outlives a run: matching content is the one and only
//! condition under which a rebuild is skipped.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::Result;

/// Stamp filename at the root of every package install directory.
pub const REVISION_FILE: &str = "3rd_revision.txt";

/// True iff `install_dir` exists, contains a stamp, and the stamp content
/// equals `revision` exactly. An absent directory, an absent stamp or
/// mismatched content all force a full rebuild.
pub fn is_up_to_date(install_dir: &Path, revision: &str) -> bool {
    match fs::read_to_string(install_dir.join(REVISION_FILE)) {
        Ok(content) => content == revision,
        Err(_) => false,
    }
}

/// Record `revision` as installed. Called only after configure, build and
/// install have all succeeded.
pub fn commit(install_dir: &Path, revision: &str) -> Result<()> {
    fs::write(install_dir.join(REVISION_FILE), revision)?;
    debug!(path = %install_dir.display(), revision, "stamp committed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn commit_then_check_round_trips() {
        let temp = TempDir::new().unwrap();
        commit(temp.path(), "1.2.3+abc").unwrap();
        assert!(is_up_to_date(temp.path(), "1.2.3+abc"));
    }

    #[test]
    fn mismatched_revision_is_stale() {
        let temp = TempDir::new().unwrap();
        commit(temp.path(), "1.2.3+abc").unwrap();
        assert!(!is_up_to_date(temp.path(), "1.2.4+abc"));
        assert!(!is_up_to_date(temp.path(), "1.2.3+def"));
    }

    #[test]
    fn missing_stamp_or_directory_is_stale() {
        let temp = TempDir::new().unwrap();
        assert!(!is_up_to_date(temp.path(), "1.0"));
        assert!(!is_up_to_date(&temp.path().join("absent"), "1.0"));
    }

    #[test]
    fn commit_overwrites_a_previous_stamp() {
        let temp = TempDir::new().unwrap();
        commit(temp.path(), "old").unwrap();
        commit(temp.path(), "new").unwrap();
        assert!(is_up_to_date(temp.path(), "new"));
        assert!(!is_up_to_date(temp.path(), "old"));
    }
}
