//! Archive extraction
//!
//! Dispatches on the declared archive kind. Extraction is skipped whenever
//! the expected unpacked directory already exists; that check is coarser
//! than the revision stamp and can mask a partial previous extraction;
//! removing the directory is the recovery path.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::command::Cmd;
use crate::error::CoreError;
use crate::Result;

/// Declared kind of a downloadable source archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveKind {
    Zip,
    TarGz,
    TarXz,
}

impl ArchiveKind {
    /// File extension used for the cached download.
    pub const fn extension(&self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::TarGz => "tar.gz",
            ArchiveKind::TarXz => "tar.xz",
        }
    }

    /// Sniff the kind from a download URL.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.ends_with(".zip") {
            Some(ArchiveKind::Zip)
        } else if url.ends_with(".tar.gz") || url.ends_with(".tgz") {
            Some(ArchiveKind::TarGz)
        } else if url.ends_with(".tar.xz") {
            Some(ArchiveKind::TarXz)
        } else {
            None
        }
    }
}

/// Where an archive's entries land relative to the shared sources root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnpackLayout {
    /// Extract into the shared sources root, trusting the archive's own
    /// top-level directory to disambiguate packages.
    CommonRoot,
    /// Create the package directory first and extract into it, for
    /// archives whose internal structure cannot be trusted to avoid
    /// collisions (single-tool archives, bare `include/` trees).
    Isolated,
}

/// Extract `archive` so that `unpacked_dir` exists afterwards.
///
/// A pre-existing `unpacked_dir` skips all work.
pub fn extract(
    archive: &Path,
    kind: ArchiveKind,
    layout: UnpackLayout,
    sources_root: &Path,
    unpacked_dir: &Path,
) -> Result<()> {
    if unpacked_dir.exists() {
        debug!(path = %unpacked_dir.display(), "already unpacked");
        return Ok(());
    }

    info!(archive = %archive.display(), "unpacking");

    let dest = match layout {
        UnpackLayout::CommonRoot => sources_root.to_path_buf(),
        UnpackLayout::Isolated => {
            fs::create_dir_all(unpacked_dir)?;
            unpacked_dir.to_path_buf()
        }
    };

    match kind {
        ArchiveKind::Zip => unpack_zip(archive, &dest),
        ArchiveKind::TarGz => unpack_tar_gz(archive, &dest),
        ArchiveKind::TarXz => {
            let tar_path = decompress_xz(archive)?;
            unpack_tar(&tar_path, &dest)
        }
    }
}

fn unpack_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| extract_error(archive, e))?;
    zip.extract(dest).map_err(|e| extract_error(archive, e))
}

fn unpack_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let decoder = GzDecoder::new(BufReader::new(file));
    tar::Archive::new(decoder)
        .unpack(dest)
        .map_err(|e| extract_error(archive, e))
}

fn unpack_tar(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    tar::Archive::new(BufReader::new(file))
        .unpack(dest)
        .map_err(|e| extract_error(archive, e))
}

/// Decompress a `.tar.xz` to its sibling `.tar` via the external `unxz`
/// tool, consuming the `.xz` (the sibling then acts as the download cache).
/// Skipped when the sibling already exists. An unavailable `unxz` surfaces
/// as a spawn error for the package being extracted.
fn decompress_xz(archive: &Path) -> Result<PathBuf> {
    let tar_path = archive.with_extension("");
    if tar_path.exists() {
        debug!(path = %tar_path.display(), "already decompressed");
        return Ok(tar_path);
    }

    Cmd::new("unxz").arg(archive).run()?;
    Ok(tar_path)
}

fn extract_error(archive: &Path, source: impl std::error::Error + Send + Sync + 'static) -> CoreError {
    CoreError::Extract {
        archive: archive.to_path_buf(),
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    fn write_tar_gz(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, content) in entries {
            let data = content.as_bytes();
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, *name, data).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn zip_extracts_into_common_root() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("pkg-1.0.zip");
        write_zip(&archive, &[("pkg-1.0/include/pkg.h", "// header")]);

        let sources = temp.path().join("sources");
        let unpacked = sources.join("pkg-1.0");
        extract(&archive, ArchiveKind::Zip, UnpackLayout::CommonRoot, &sources, &unpacked).unwrap();

        assert!(unpacked.join("include/pkg.h").is_file());
    }

    #[test]
    fn isolated_layout_confines_a_flat_archive() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("tool-1.1.zip");
        write_zip(&archive, &[("tool.exe", "binary"), ("license.txt", "text")]);

        let sources = temp.path().join("sources");
        let unpacked = sources.join("tool-1.1");
        extract(&archive, ArchiveKind::Zip, UnpackLayout::Isolated, &sources, &unpacked).unwrap();

        assert!(unpacked.join("tool.exe").is_file());
        assert!(unpacked.join("license.txt").is_file());
        assert!(!sources.join("tool.exe").exists());
    }

    #[test]
    fn tar_gz_extracts_into_common_root() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("pkg-2.0.tar.gz");
        write_tar_gz(&archive, &[("pkg-2.0/src/lib.c", "int x;"), ("pkg-2.0/README", "hi")]);

        let sources = temp.path().join("sources");
        let unpacked = sources.join("pkg-2.0");
        extract(&archive, ArchiveKind::TarGz, UnpackLayout::CommonRoot, &sources, &unpacked).unwrap();

        assert!(unpacked.join("src/lib.c").is_file());
        assert!(unpacked.join("README").is_file());
    }

    #[test]
    fn existing_unpacked_dir_skips_extraction() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("pkg-1.0.tar.gz");
        write_tar_gz(&archive, &[("pkg-1.0/file", "v1")]);

        let sources = temp.path().join("sources");
        let unpacked = sources.join("pkg-1.0");
        extract(&archive, ArchiveKind::TarGz, UnpackLayout::CommonRoot, &sources, &unpacked).unwrap();

        // Corrupt the archive; a second call must not read it.
        fs::write(&archive, b"not a tar.gz").unwrap();
        extract(&archive, ArchiveKind::TarGz, UnpackLayout::CommonRoot, &sources, &unpacked).unwrap();
        assert_eq!(fs::read_to_string(unpacked.join("file")).unwrap(), "v1");
    }

    #[test]
    fn corrupt_archive_is_an_extract_error() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("pkg-1.0.zip");
        fs::write(&archive, b"definitely not a zip").unwrap();

        let sources = temp.path().join("sources");
        let err = extract(
            &archive,
            ArchiveKind::Zip,
            UnpackLayout::CommonRoot,
            &sources,
            &sources.join("pkg-1.0"),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Extract { .. }));
    }

    #[test]
    #[serial]
    #[cfg(unix)]
    fn missing_unxz_fails_deterministically() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("pkg-3.0.tar.xz");
        fs::write(&archive, b"xz payload").unwrap();

        // Point PATH at an empty directory so unxz cannot be found.
        let empty = temp.path().join("empty-path");
        fs::create_dir_all(&empty).unwrap();

        temp_env::with_var("PATH", Some(empty.as_os_str()), || {
            let sources = temp.path().join("sources");
            let err = extract(
                &archive,
                ArchiveKind::TarXz,
                UnpackLayout::CommonRoot,
                &sources,
                &sources.join("pkg-3.0"),
            )
            .unwrap_err();
            assert!(matches!(err, CoreError::Spawn { ref program, .. } if program == "unxz"));
        });
    }

    #[test]
    fn kind_sniffing_from_url() {
        assert_eq!(ArchiveKind::from_url("http://x/pkg.zip"), Some(ArchiveKind::Zip));
        assert_eq!(ArchiveKind::from_url("http://x/pkg.tar.gz"), Some(ArchiveKind::TarGz));
        assert_eq!(ArchiveKind::from_url("http://x/pkg.tar.xz"), Some(ArchiveKind::TarXz));
        assert_eq!(ArchiveKind::from_url("http://x/pkg.tar.bz2"), None);
    }
}
