// src/build/mod.rs

//! Incremental build orchestration.
//!
//! - [`outcome`] defines the per-variant and per-unit result types; the
//!   unit outcome is the explicit skip/build/fail state machine.
//! - [`staging`] implements the staging-then-promote pattern that makes
//!   partial failures rollback-free.
//! - [`unit`] coordinates one unit: skip decision, variant execution,
//!   promotion, checksum update.
//! - [`runner`] drives the coordinator over all configured units and
//!   aggregates the run report.

pub mod outcome;
pub mod runner;
pub mod staging;
pub mod unit;

pub use outcome::{UnitOutcome, VariantResult, VariantStatus};
pub use runner::{run_build, RunOptions};
pub use staging::StagingArea;
pub use unit::build_unit;
