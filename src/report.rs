// src/report.rs

//! Run-wide build report.
//!
//! The report is an explicit, append-only accumulator owned by the run
//! orchestrator for the duration of one run; it is passed around rather
//! than living in a global, so the coordinator stays testable in
//! isolation.

use std::fs::OpenOptions;
use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::build::UnitOutcome;

/// Per-unit outcomes plus the derived run-level answers: did everything
/// succeed, and which units changed.
#[derive(Debug, Default)]
pub struct BuildReport {
    entries: Vec<(String, UnitOutcome)>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one unit's outcome. Units are recorded in processing order.
    pub fn record(&mut self, unit: &str, outcome: UnitOutcome) {
        self.entries.push((unit.to_string(), outcome));
    }

    pub fn entries(&self) -> &[(String, UnitOutcome)] {
        &self.entries
    }

    /// True when no recorded unit failed.
    pub fn success(&self) -> bool {
        self.entries.iter().all(|(_, o)| !o.is_failure())
    }

    pub fn failed_units(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, o)| o.is_failure())
            .map(|(u, _)| u.as_str())
            .collect()
    }

    /// Units that were rebuilt and produced output in this run, in
    /// processing order.
    pub fn changed_units(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, o)| o.changed())
            .map(|(u, _)| u.as_str())
            .collect()
    }

    /// The changed-unit list as a single comma-separated value.
    pub fn changed_units_csv(&self) -> String {
        self.changed_units().join(",")
    }
}

/// Environment variable naming the CI output file (GitHub Actions
/// convention).
pub const ACTION_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Publish the changed-unit list as a CI output value.
///
/// Appends `changed-units=<csv>` to the file named by `$GITHUB_OUTPUT`.
/// A no-op outside of CI (variable unset or empty).
pub fn write_action_output(report: &BuildReport) -> Result<()> {
    let Ok(path) = std::env::var(ACTION_OUTPUT_ENV) else {
        return Ok(());
    };
    if path.is_empty() {
        return Ok(());
    }

    let csv = report.changed_units_csv();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening action output file at {path:?}"))?;
    writeln!(file, "changed-units={csv}")
        .with_context(|| format!("writing action output to {path:?}"))?;

    info!(path = %path, changed_units = %csv, "wrote action output");
    Ok(())
}
