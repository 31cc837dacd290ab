// src/build/staging.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::compile::Variant;

/// Staging area for one unit's build attempt.
///
/// Variants compile into per-variant subdirectories of a temp dir *inside*
/// the unit directory (same filesystem, so promotion is a plain rename).
/// Outputs are registered with [`stage`](StagingArea::stage) and only moved
/// to their canonical paths by [`promote`](StagingArea::promote) once every
/// attempted variant has succeeded. Dropping the area without promoting
/// discards the whole attempt and leaves the unit directory as it was.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
    planned: Vec<PlannedArtifact>,
}

#[derive(Debug)]
struct PlannedArtifact {
    staged: PathBuf,
    canonical: PathBuf,
}

impl StagingArea {
    pub fn new(unit_dir: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(unit_dir)
            .with_context(|| format!("creating staging directory in {:?}", unit_dir))?;
        debug!(staging = ?dir.path(), "created staging area");

        Ok(Self {
            dir,
            planned: Vec::new(),
        })
    }

    /// Output directory for one variant's compilation, created on demand.
    pub fn variant_dir(&self, variant: Variant) -> Result<PathBuf> {
        let dir = self.dir.path().join(variant.to_string());
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating staging subdirectory {:?}", dir))?;
        Ok(dir)
    }

    /// Register a staged file for promotion to its canonical path.
    pub fn stage(&mut self, staged: PathBuf, canonical: PathBuf) {
        debug!(from = ?staged, to = ?canonical, "staged output");
        self.planned.push(PlannedArtifact { staged, canonical });
    }

    /// Number of outputs registered so far.
    pub fn staged_count(&self) -> usize {
        self.planned.len()
    }

    /// Move every registered output to its canonical path.
    ///
    /// Consumes the area; remaining intermediates in the temp dir are
    /// cleaned up afterwards. Returns the canonical paths that were
    /// written.
    pub fn promote(self) -> Result<Vec<PathBuf>> {
        let mut promoted = Vec::with_capacity(self.planned.len());

        for artifact in self.planned {
            // Renames don't replace existing files on all platforms.
            if artifact.canonical.exists() {
                fs::remove_file(&artifact.canonical).with_context(|| {
                    format!("removing old artifact at {:?}", artifact.canonical)
                })?;
            }
            fs::rename(&artifact.staged, &artifact.canonical).with_context(|| {
                format!(
                    "promoting {:?} to {:?}",
                    artifact.staged, artifact.canonical
                )
            })?;
            promoted.push(artifact.canonical);
        }

        info!(count = promoted.len(), "promoted staged outputs");
        Ok(promoted)
    }
}
