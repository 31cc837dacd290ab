// src/compile/mod.rs

//! External compiler invocation layer.
//!
//! This module is responsible for turning one variant of one unit into a
//! PDF by driving the external `latexmk` tool:
//!
//! - [`variant`] defines the three build flavours (lesson, exercise,
//!   solution) and their source directories and file suffixes.
//! - [`target`] maps a variant plus the configured entry points onto
//!   concrete file names and TeX arguments.
//! - [`latexmk`] owns the actual blocking process invocation.
//!
//! The [`Compiler`] trait is the seam the build coordinator talks through;
//! tests substitute a fake implementation for it.

pub mod latexmk;
pub mod target;
pub mod variant;

use std::path::Path;

use anyhow::Result;

pub use latexmk::LatexmkCompiler;
pub use target::{create_targets, CompilationTarget};
pub use variant::{Variant, EXERCISE_DIR_NAME, LESSON_DIR_NAME};

/// One compilation request: compile `entry_point` under the name
/// `output_name` into `output_dir`.
#[derive(Debug, Clone)]
pub struct CompileRequest<'a> {
    /// Path to the root TeX file for this variant.
    pub entry_point: &'a Path,

    /// Job name of the compilation; the artifact becomes
    /// `<output_name>.pdf` inside `output_dir`.
    pub output_name: &'a str,

    /// Directory that receives the artifact and all intermediates.
    pub output_dir: &'a Path,

    /// Extra TeX code prepended to the compilation (e.g. the solution
    /// switch). Contains the `%S` placeholder for the source file.
    pub pretex: &'a str,
}

/// Result of one compiler invocation.
///
/// `success` reflects the tool's exit status only; whether the expected
/// artifact actually exists is checked by the caller.
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    pub success: bool,
    pub log: String,
}

/// The external document compiler, as seen by the build coordinator.
///
/// Implementations block until the tool exits. An `Err` means the tool
/// could not be run at all; a clean run that *reported* errors is
/// `Ok` with `success = false`.
pub trait Compiler {
    fn compile(&self, req: &CompileRequest<'_>) -> Result<CompileOutcome>;
}
