// src/hash/fingerprint.rs

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blake3::Hasher;
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::WalkDir;

/// Patterns that are always excluded from the fingerprint.
///
/// These cover LaTeX intermediates, our own build logs, and the checksum
/// record itself. Generated PDFs are excluded per unit via their concrete
/// file names (see [`build_ignore_set`]), not with a blanket `*.pdf`, so
/// that PDFs which are genuine *inputs* (e.g. included figures) still
/// contribute to the fingerprint.
pub const GENERATED_IGNORE_PATTERNS: &[&str] = &[
    "*.aux",
    "*.fdb_latexmk",
    "*.fls",
    "*.log",
    "*.out",
    "*.synctex.gz",
    "*.build_log",
    ".checksum",
];

/// Compile the default ignore patterns plus per-unit extras into a `GlobSet`.
///
/// `extra` is matched against the same unit-relative paths as the defaults,
/// e.g. `"Aufgabe/UE01.pdf"` for a generated exercise PDF.
pub fn build_ignore_set<I, S>(extra: I) -> Result<GlobSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = GlobSetBuilder::new();

    for pattern in GENERATED_IGNORE_PATTERNS {
        // Match the bare pattern at any depth.
        let glob = Glob::new(&format!("**/{pattern}"))
            .with_context(|| format!("compiling ignore pattern '{pattern}'"))?;
        builder.add(glob);
    }

    for pattern in extra {
        let pattern = pattern.as_ref();
        let glob = Glob::new(pattern)
            .with_context(|| format!("compiling ignore pattern '{pattern}'"))?;
        builder.add(glob);
    }

    builder.build().context("building ignore glob set")
}

/// Compute a deterministic fingerprint over a unit's source sub-trees.
///
/// Files are enumerated recursively and sorted by their unit-relative path
/// (e.g. `Unterricht/sections/intro.tex`), so the digest does not depend on
/// filesystem traversal order or the OS. Each file contributes its relative
/// path and full byte content; timestamps and permissions never matter.
///
/// A missing sub-tree contributes nothing. Two unit states with identical
/// fingerprints are considered build-equivalent.
pub fn fingerprint_unit(unit_dir: &Path, subtrees: &[&str], ignore: &GlobSet) -> Result<String> {
    let mut files: Vec<PathBuf> = Vec::new();

    for subtree in subtrees {
        let root = unit_dir.join(subtree);
        if !root.is_dir() {
            continue;
        }

        for entry in WalkDir::new(&root) {
            let entry =
                entry.with_context(|| format!("walking source tree {:?}", root))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(unit_dir)
                .with_context(|| format!("relativizing {:?}", entry.path()))?;
            if ignore.is_match(rel) {
                debug!("fingerprint: ignoring {:?}", rel);
                continue;
            }
            files.push(rel.to_path_buf());
        }
    }

    // Sort by the normalized relative path so the digest is stable across
    // platforms and traversal orders.
    files.sort_by(|a, b| normalize(a).cmp(&normalize(b)));

    let mut hasher = Hasher::new();

    for rel in files {
        let norm = normalize(&rel);
        hasher.update(norm.as_bytes());
        hasher.update(b"\0");

        let path = unit_dir.join(&rel);
        let mut file =
            File::open(&path).with_context(|| format!("opening file for hashing: {:?}", path))?;
        let mut buf = [0u8; 8192];
        loop {
            let n = file.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        hasher.update(b"\0");
    }

    let hash = hasher.finalize().to_hex().to_string();
    debug!(unit_dir = ?unit_dir, hash = %hash, "computed unit fingerprint");
    Ok(hash)
}

/// Render a relative path with `/` separators regardless of platform.
fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
