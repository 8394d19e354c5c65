//! Filtered recursive copy
//!
//! Install trees are assembled by copying from build/source locations,
//! optionally restricted to one filename suffix. Several filtered copies can
//! be layered into the same destination by disabling the initial clear.

use std::fs;
use std::path::Path;

use crate::Result;

/// Recursively copy `src` into `dst`.
///
/// Files are copied only when `extension` is unset or the filename ends
/// with it; directory structure is always mirrored. When `clear_dest` is
/// true the destination (file or whole tree) is removed before the copy
/// begins, producing a clean tree.
pub fn filter_copy(src: &Path, dst: &Path, extension: Option<&str>, clear_dest: bool) -> Result<()> {
    if clear_dest {
        remove_fs_object(dst)?;
    }

    fs::create_dir_all(dst)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            // The destination subtree is freshly created either way; only
            // the top-level clear is meaningful.
            filter_copy(&src_path, &dst_path, extension, false)?;
        } else if matches_extension(&entry.file_name(), extension) {
            fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Copy an unpacked source tree into the build directory, for packages that
/// only build in-source (autotools and friends).
pub fn copy_sources_to_build(src: &Path, build_dir: &Path) -> Result<()> {
    filter_copy(src, build_dir, None, false)
}

/// Remove a path whatever it is (file, symlink or directory tree). Missing
/// paths are fine.
pub fn remove_fs_object(path: &Path) -> Result<()> {
    if path.is_symlink() || path.is_file() {
        fs::remove_file(path)?;
    } else if path.is_dir() {
        fs::remove_dir_all(path)?;
    }
    Ok(())
}

fn matches_extension(file_name: &std::ffi::OsStr, extension: Option<&str>) -> bool {
    match extension {
        None => true,
        Some(ext) => file_name.to_string_lossy().ends_with(ext),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn extension_filter_preserves_structure() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        touch(&src.join("api/header.h"), "h");
        touch(&src.join("api/impl.c"), "c");
        touch(&src.join("top.h"), "h");

        let dst = temp.path().join("include");
        filter_copy(&src, &dst, Some(".h"), true).unwrap();

        assert!(dst.join("api/header.h").is_file());
        assert!(dst.join("top.h").is_file());
        assert!(!dst.join("api/impl.c").exists());
    }

    #[test]
    fn clear_dest_produces_a_clean_tree() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        touch(&src.join("new.lib"), "new");

        let dst = temp.path().join("lib");
        touch(&dst.join("stale.lib"), "old");

        filter_copy(&src, &dst, None, true).unwrap();
        assert!(dst.join("new.lib").is_file());
        assert!(!dst.join("stale.lib").exists());
    }

    #[test]
    fn layered_copies_compose_without_clobbering() {
        let temp = TempDir::new().unwrap();
        let libs = temp.path().join("libs");
        touch(&libs.join("core.lib"), "lib");
        let headers = temp.path().join("headers");
        touch(&headers.join("core.h"), "h");

        let dst = temp.path().join("install");
        filter_copy(&libs, &dst, Some(".lib"), true).unwrap();
        filter_copy(&headers, &dst, Some(".h"), false).unwrap();

        assert!(dst.join("core.lib").is_file());
        assert!(dst.join("core.h").is_file());
    }

    #[test]
    fn file_destination_is_replaced_when_clearing() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        touch(&src.join("a.txt"), "a");

        let dst = temp.path().join("out");
        fs::write(&dst, "a plain file in the way").unwrap();

        filter_copy(&src, &dst, None, true).unwrap();
        assert!(dst.is_dir());
        assert!(dst.join("a.txt").is_file());
    }

    #[test]
    fn remove_fs_object_handles_all_shapes() {
        let temp = TempDir::new().unwrap();

        let file = temp.path().join("file");
        fs::write(&file, "x").unwrap();
        remove_fs_object(&file).unwrap();
        assert!(!file.exists());

        let dir = temp.path().join("dir");
        touch(&dir.join("nested/deep.txt"), "x");
        remove_fs_object(&dir).unwrap();
        assert!(!dir.exists());

        // Missing path is a no-op.
        remove_fs_object(&temp.path().join("absent")).unwrap();
    }
}
