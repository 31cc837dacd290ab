// src/hash/store.rs

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Name of the per-unit checksum file, stored in the unit's directory.
///
/// The file holds a single line: the hex fingerprint of the unit's sources
/// after the last fully successful build.
pub const CHECKSUM_FILE_NAME: &str = ".checksum";

fn checksum_path(unit_dir: &Path) -> PathBuf {
    unit_dir.join(CHECKSUM_FILE_NAME)
}

/// Read the stored checksum for a unit, if present.
///
/// A missing or unreadable file is a normal cold-start state and yields
/// `None` ("never successfully built"), never an error.
pub fn read_checksum(unit_dir: &Path) -> Option<String> {
    let path = checksum_path(unit_dir);

    match fs::read_to_string(&path) {
        Ok(contents) => {
            let digest = contents.trim().to_string();
            debug!(path = ?path, digest = %digest, "read stored checksum");
            Some(digest)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = ?path, "no stored checksum");
            None
        }
        Err(err) => {
            warn!(path = ?path, error = %err, "unreadable checksum file, treating as absent");
            None
        }
    }
}

/// Persist the checksum for a unit.
///
/// The write goes through a temp file in the same directory followed by a
/// rename, so a crash mid-write can never leave a half-written checksum: the
/// next run either sees the old digest or none at all, and rebuilds.
pub fn write_checksum(unit_dir: &Path, digest: &str) -> Result<()> {
    let path = checksum_path(unit_dir);

    let mut tmp = NamedTempFile::new_in(unit_dir)
        .with_context(|| format!("creating temp checksum file in {:?}", unit_dir))?;
    tmp.write_all(digest.as_bytes())
        .and_then(|_| tmp.write_all(b"\n"))
        .with_context(|| format!("writing temp checksum file in {:?}", unit_dir))?;
    tmp.persist(&path)
        .with_context(|| format!("persisting checksum file at {:?}", path))?;

    info!(path = ?path, digest = %digest, "stored checksum");
    Ok(())
}

/// Remove the stored checksum for a unit, forcing a rebuild on the next run.
pub fn clear_checksum(unit_dir: &Path) -> Result<()> {
    let path = checksum_path(unit_dir);
    match fs::remove_file(&path) {
        Ok(()) => {
            info!(path = ?path, "cleared checksum");
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => {
            Err(err).with_context(|| format!("removing checksum file at {:?}", path))
        }
    }
}
