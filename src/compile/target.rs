// src/compile/target.rs

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::compile::variant::Variant;
use crate::config::ConfigFile;

/// Semesters from this year on use the `\ifsolutions` macro system; older
/// sources still expect `\withSolutions`.
pub const SOLUTION_MACRO_CUTOFF: u32 = 22;

/// One variant's compilation recipe: where to compile from, under which
/// name, and with which TeX preamble.
///
/// Targets are unit-independent; all unit-specific paths and names are
/// derived on demand from the unit name and directory.
#[derive(Debug, Clone)]
pub struct CompilationTarget {
    pub variant: Variant,

    /// Entry-point file name inside the variant's source sub-tree.
    pub entry_point: String,

    /// TeX code prepended to the compilation, with the `%S` placeholder for
    /// the source file.
    pub pretex: String,
}

impl CompilationTarget {
    /// The source sub-tree root for a given unit.
    pub fn source_root(&self, unit_dir: &Path) -> PathBuf {
        unit_dir.join(self.variant.source_dir())
    }

    /// The entry-point path for a given unit.
    pub fn entry_path(&self, unit_dir: &Path) -> PathBuf {
        self.source_root(unit_dir).join(&self.entry_point)
    }

    /// Job name of the compilation (`UE01_solution`).
    pub fn output_name(&self, unit: &str) -> String {
        format!("{unit}{}", self.variant.file_suffix())
    }

    /// File name of the produced PDF (`UE01_solution.pdf`).
    pub fn artifact_name(&self, unit: &str) -> String {
        format!("{}.pdf", self.output_name(unit))
    }

    /// File name of the persisted build log (`UE01_solution.build_log`).
    pub fn log_name(&self, unit: &str) -> String {
        format!("{}.build_log", self.output_name(unit))
    }

    /// Unit-relative paths of the files this target generates.
    ///
    /// These are excluded from the unit fingerprint so that a successful
    /// build does not invalidate its own checksum.
    pub fn generated_files(&self, unit: &str) -> [String; 2] {
        let dir = self.variant.source_dir();
        [
            format!("{dir}/{}", self.artifact_name(unit)),
            format!("{dir}/{}", self.log_name(unit)),
        ]
    }
}

/// Build the three default targets (lesson, exercise, solution) for a
/// configuration.
///
/// The solution pretex depends on the semester: older semesters use the old
/// `\withSolutions` macro system, newer ones the `\ifsolutions` switch.
pub fn create_targets(config: &ConfigFile) -> Result<Vec<CompilationTarget>> {
    let semester = config.semester_year()?;

    let target = |variant: Variant, entry_point: &str| CompilationTarget {
        variant,
        entry_point: entry_point.to_string(),
        pretex: pretex_for(variant, semester).to_string(),
    };

    Ok(vec![
        target(Variant::Lesson, &config.entry_points.lesson),
        target(Variant::Exercise, &config.entry_points.exercise),
        target(Variant::Solution, &config.entry_points.exercise),
    ])
}

fn pretex_for(variant: Variant, semester: u32) -> &'static str {
    match variant {
        Variant::Solution if semester < SOLUTION_MACRO_CUTOFF => {
            r"\def\withSolutions{} \input{%S}"
        }
        Variant::Solution => r"\newif\ifsolutions\solutionstrue \input{%S}",
        Variant::Lesson | Variant::Exercise => r"\input{%S}",
    }
}
