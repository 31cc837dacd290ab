// src/config/model.rs

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// active_semester = "25WS"
/// units = ["UE01", "UE02", "UE03"]
///
/// [entry_points]
/// lesson = "lesson.tex"
/// exercise = "exercise.tex"
/// ```
///
/// `units` is an ordered list: units are processed in exactly this order.
/// Units that exist on disk but are not listed here are never considered,
/// which is how not-yet-released exercises are kept out of the build.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Name of the active semester, e.g. `"25WS"`.
    ///
    /// This doubles as the directory name of the semester root under the
    /// working directory.
    pub active_semester: String,

    /// Ordered list of unit names to consider, e.g. `["UE01", "UE02"]`.
    pub units: Vec<String>,

    /// Entry-point file names from `[entry_points]`.
    pub entry_points: EntryPoints,
}

/// `[entry_points]` section: the designated root TeX file per source
/// sub-tree.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryPoints {
    /// Entry point inside a unit's lesson sub-tree.
    pub lesson: String,

    /// Entry point inside a unit's exercise sub-tree (also used for the
    /// solution variant).
    pub exercise: String,
}

impl ConfigFile {
    /// Resolve the semester root directory against a working directory.
    pub fn semester_root(&self, workdir: &Path) -> PathBuf {
        workdir.join(&self.active_semester)
    }

    /// Parse the two-digit year out of the semester name (`"25WS"` -> `25`).
    ///
    /// The year selects which solution macro system the TeX sources expect,
    /// so a semester name it can't be parsed from is a hard error rather
    /// than a silent default.
    pub fn semester_year(&self) -> Result<u32> {
        let name = self.active_semester.trim();
        let digits: String = name.chars().take_while(|c| c.is_ascii_digit()).collect();
        let term = &name[digits.len()..];

        if digits.len() != 2 || !matches!(term, "WS" | "SS") {
            return Err(anyhow!(
                "invalid active_semester '{}' (expected e.g. \"25WS\" or \"25SS\")",
                self.active_semester
            ));
        }

        Ok(digits.parse()?)
    }
}
