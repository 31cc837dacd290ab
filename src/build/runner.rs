// src/build/runner.rs

//! Run orchestration over all configured units.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::build::outcome::UnitOutcome;
use crate::build::unit::build_unit;
use crate::compile::{create_targets, Compiler};
use crate::config::ConfigFile;
use crate::report::BuildReport;

/// Options controlling a whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Stop enumerating units after the first failed unit.
    ///
    /// Already-committed successes are kept either way; this only cuts the
    /// run short.
    pub fail_fast: bool,
}

/// Drive the unit coordinator over every configured unit, in configuration
/// order, and aggregate the outcomes.
///
/// Only units listed in the configuration are considered; units present on
/// disk but not listed are ignored. A listed unit whose directory does not
/// exist has nothing to build: zero variants attempted, trivially
/// succeeded, not a change.
pub fn run_build(
    cfg: &ConfigFile,
    workdir: &Path,
    compiler: &dyn Compiler,
    options: &RunOptions,
) -> Result<BuildReport> {
    let targets = create_targets(cfg)?;
    let semester_root = cfg.semester_root(workdir);

    info!(
        semester = %cfg.active_semester,
        root = ?semester_root,
        units = cfg.units.len(),
        "starting build run"
    );

    let mut report = BuildReport::new();

    for unit in cfg.units.iter() {
        let unit_dir = semester_root.join(unit);

        if !unit_dir.is_dir() {
            warn!(unit = %unit, dir = ?unit_dir, "unit directory does not exist, nothing to do");
            report.record(
                unit,
                UnitOutcome::Succeeded {
                    variants: Vec::new(),
                    changed: false,
                },
            );
            continue;
        }

        let outcome = build_unit(compiler, unit, &unit_dir, &targets);
        let failed = outcome.is_failure();
        report.record(unit, outcome);

        if failed && options.fail_fast {
            warn!(unit = %unit, "unit failed and fail-fast is set, stopping run");
            break;
        }
    }

    info!(
        success = report.success(),
        changed = report.changed_units().len(),
        "build run finished"
    );

    Ok(report)
}
