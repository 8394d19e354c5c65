//! Source artifact fetching
//!
//! Two acquisition paths feed the pipeline: HTTP downloads of release
//! archives, and git checkouts of exact pinned refs. Both are cached by
//! presence: an existing download file or checkout directory is reused
//! as-is, with no freshness check beyond the revision stamp upstream.

use std::fs::{self, File};
use std::path::Path;

use tracing::{debug, info};

use crate::command::Cmd;
use crate::error::CoreError;
use crate::Result;

/// Download `url` to `dest`, skipping the transfer when `dest` exists.
///
/// For a `.tar.xz` artifact the extractor replaces the download with its
/// decompressed `.tar` sibling, so the presence of that sibling also counts
/// as a cache hit.
pub fn download(url: &str, dest: &Path) -> Result<()> {
    if dest.exists() {
        debug!(path = %dest.display(), "download cached");
        return Ok(());
    }

    if dest.extension().is_some_and(|ext| ext == "xz") && dest.with_extension("").exists() {
        debug!(path = %dest.display(), "decompressed sibling present, skipping download");
        return Ok(());
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    info!(url, "downloading");

    let mut response = reqwest::blocking::get(url).map_err(|source| CoreError::Download {
        url: url.to_string(),
        source,
    })?;

    if !response.status().is_success() {
        return Err(CoreError::DownloadStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let mut file = File::create(dest)?;
    response.copy_to(&mut file).map_err(|source| CoreError::Download {
        url: url.to_string(),
        source,
    })?;

    info!(path = %dest.display(), "downloaded");
    Ok(())
}

/// Clone `url` into `dest` and check out the exact pinned `rev`.
///
/// Skipped entirely when `dest` already exists; the checkout shares the
/// unpacked-sources cache discipline of the archive path, so a stale or
/// partial checkout is only rebuilt when the directory is removed.
pub fn checkout_git(url: &str, rev: &str, dest: &Path) -> Result<()> {
    if dest.exists() {
        debug!(path = %dest.display(), "checkout cached");
        return Ok(());
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    info!(url, rev, "cloning");
    Cmd::new("git").arg("clone").arg(url).arg(dest).run()?;
    Cmd::new("git")
        .arg("-C")
        .arg(dest)
        .arg("checkout")
        .arg("--force")
        .arg(rev)
        .run()?;

    Ok(())
}
