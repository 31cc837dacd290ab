// src/build/unit.rs

//! Per-unit build coordination.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::build::outcome::{UnitOutcome, VariantResult, VariantStatus};
use crate::build::staging::StagingArea;
use crate::compile::{
    CompilationTarget, CompileRequest, Compiler, EXERCISE_DIR_NAME, LESSON_DIR_NAME,
};
use crate::hash::{build_ignore_set, fingerprint_unit, read_checksum, write_checksum};

/// The sub-trees whose contents make up a unit's fingerprint.
const SOURCE_SUBTREES: [&str; 2] = [LESSON_DIR_NAME, EXERCISE_DIR_NAME];

/// Build one unit: decide skip-vs-build, run the applicable variants, and
/// commit or discard the results.
///
/// Never panics or aborts the run; any internal error is reported as a
/// failed unit so the orchestrator can continue with the next one.
pub fn build_unit(
    compiler: &dyn Compiler,
    unit: &str,
    unit_dir: &Path,
    targets: &[CompilationTarget],
) -> UnitOutcome {
    match build_unit_inner(compiler, unit, unit_dir, targets) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(unit, error = ?err, "unit build error");
            UnitOutcome::Failed {
                variants: Vec::new(),
            }
        }
    }
}

fn build_unit_inner(
    compiler: &dyn Compiler,
    unit: &str,
    unit_dir: &Path,
    targets: &[CompilationTarget],
) -> Result<UnitOutcome> {
    let generated: Vec<String> = targets
        .iter()
        .flat_map(|t| t.generated_files(unit))
        .collect();
    let ignore = build_ignore_set(&generated)?;

    let current = fingerprint_unit(unit_dir, &SOURCE_SUBTREES, &ignore)?;
    let stored = read_checksum(unit_dir);

    if stored.as_deref() == Some(current.as_str()) {
        info!(unit, "no changes detected");
        return Ok(UnitOutcome::SkippedUpToDate);
    }

    info!(unit, "changes detected, rebuilding");

    let mut staging = StagingArea::new(unit_dir)?;
    let mut variants = Vec::with_capacity(targets.len());

    for target in targets {
        let status = run_variant(compiler, unit, unit_dir, target, &mut staging)?;
        variants.push(VariantResult {
            variant: target.variant,
            status,
        });
    }

    if variants.iter().any(|v| v.status == VariantStatus::Failed) {
        // Dropping the staging area discards every output of this attempt,
        // leaving the unit directory as it was before the run. No checksum
        // is written, so the next run retries from scratch.
        error!(unit, "unit build failed, discarding staged outputs");
        return Ok(UnitOutcome::Failed { variants });
    }

    let changed = staging.staged_count() > 0;
    staging.promote()?;

    // Artifact writes are excluded from the fingerprint, so this digest is
    // normally identical to `current`; recomputing guards against sources
    // having changed underneath us during the build.
    let digest = fingerprint_unit(unit_dir, &SOURCE_SUBTREES, &ignore)?;
    write_checksum(unit_dir, &digest)
        .with_context(|| format!("storing checksum after successful build of '{unit}'"))?;

    info!(unit, changed, "unit build succeeded");
    Ok(UnitOutcome::Succeeded { variants, changed })
}

/// Run a single variant into the staging area.
///
/// Returns `Skipped` when the variant's source sub-tree or entry point is
/// absent, `Built` on success (artifact + log registered for promotion),
/// `Failed` otherwise.
fn run_variant(
    compiler: &dyn Compiler,
    unit: &str,
    unit_dir: &Path,
    target: &CompilationTarget,
    staging: &mut StagingArea,
) -> Result<VariantStatus> {
    let source_root = target.source_root(unit_dir);
    let entry_point = target.entry_path(unit_dir);

    if !source_root.is_dir() || !entry_point.is_file() {
        debug!(
            unit,
            variant = %target.variant,
            entry = ?entry_point,
            "source tree or entry point missing, variant skipped"
        );
        return Ok(VariantStatus::Skipped);
    }

    let output_name = target.output_name(unit);
    let output_dir = staging.variant_dir(target.variant)?;

    info!(unit, variant = %target.variant, "building {output_name}");

    let outcome = compiler.compile(&CompileRequest {
        entry_point: &entry_point,
        output_name: &output_name,
        output_dir: &output_dir,
        pretex: &target.pretex,
    })?;

    let artifact = output_dir.join(target.artifact_name(unit));

    if !outcome.success || !artifact.is_file() {
        error!(
            unit,
            variant = %target.variant,
            "failed compilation of {output_name}"
        );
        // Surface the compiler log in the run output before the staged
        // attempt is discarded.
        for line in outcome.log.lines() {
            error!(unit, variant = %target.variant, "{line}");
        }
        return Ok(VariantStatus::Failed);
    }

    let log_staged = output_dir.join(target.log_name(unit));
    fs::write(&log_staged, outcome.log.as_bytes())
        .with_context(|| format!("writing build log {:?}", log_staged))?;

    staging.stage(artifact, source_root.join(target.artifact_name(unit)));
    staging.stage(log_staged, source_root.join(target.log_name(unit)));

    info!(unit, variant = %target.variant, "successfully compiled {output_name}");
    Ok(VariantStatus::Built)
}
