// src/lib.rs

pub mod build;
pub mod cli;
pub mod compile;
pub mod config;
pub mod errors;
pub mod hash;
pub mod logging;
pub mod report;

use anyhow::Result;
use tracing::{error, info};

use crate::build::{run_build, RunOptions, UnitOutcome};
use crate::cli::CliArgs;
use crate::compile::{create_targets, LatexmkCompiler};
use crate::config::loader::load_and_validate;
use crate::config::ConfigFile;
use crate::errors::CoursetexError;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the latexmk compiler
/// - the per-unit build coordinator and the run report
///
/// Prints the changed-unit list to stdout, publishes it as a CI output, and
/// returns an error (→ non-zero exit) when any unit failed — independent of
/// the successes that were still committed.
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg)?;
        return Ok(());
    }

    let compiler = LatexmkCompiler::new();
    let options = RunOptions {
        fail_fast: args.fail_fast,
    };

    let report = run_build(&cfg, &args.workdir, &compiler, &options)?;

    for (unit, outcome) in report.entries() {
        match outcome {
            UnitOutcome::SkippedUpToDate => info!(unit = %unit, "up to date"),
            UnitOutcome::Succeeded { changed, .. } => {
                info!(unit = %unit, changed, "succeeded")
            }
            UnitOutcome::Failed { .. } => error!(unit = %unit, "failed"),
        }
    }

    // The changed-unit list is the run's stdout contract.
    println!("{}", report.changed_units_csv());
    report::write_action_output(&report)?;

    if !report.success() {
        return Err(CoursetexError::BuildFailed {
            failed: report.failed_units().len(),
            attempted: report.entries().len(),
        }
        .into());
    }

    Ok(())
}

/// Simple dry-run output: print semester, units and compilation targets.
fn print_dry_run(cfg: &ConfigFile) -> Result<()> {
    let targets = create_targets(cfg)?;

    println!("coursetex dry-run");
    println!("  active_semester = {}", cfg.active_semester);
    println!();

    println!("targets ({}):", targets.len());
    for target in targets.iter() {
        println!("  - {}", target.variant);
        println!("      source dir: {}", target.variant.source_dir());
        println!("      entry point: {}", target.entry_point);
        println!("      pretex: {}", target.pretex);
    }
    println!();

    println!("units ({}):", cfg.units.len());
    for unit in cfg.units.iter() {
        println!("  - {unit}");
    }

    Ok(())
}
