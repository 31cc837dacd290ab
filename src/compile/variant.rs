// src/compile/variant.rs

use std::fmt;

/// Name of a unit's lesson source sub-tree.
pub const LESSON_DIR_NAME: &str = "Unterricht";

/// Name of a unit's exercise source sub-tree (shared by the exercise and
/// solution variants).
pub const EXERCISE_DIR_NAME: &str = "Aufgabe";

/// One build flavour of a unit.
///
/// Lesson builds from the lesson sub-tree; exercise and solution both build
/// from the exercise sub-tree, the solution with the expected-results switch
/// enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Lesson,
    Exercise,
    Solution,
}

impl Variant {
    /// All variants in the fixed order they are built per unit.
    pub const ALL: [Variant; 3] = [Variant::Lesson, Variant::Exercise, Variant::Solution];

    /// The source sub-tree this variant compiles from.
    pub fn source_dir(self) -> &'static str {
        match self {
            Variant::Lesson => LESSON_DIR_NAME,
            Variant::Exercise | Variant::Solution => EXERCISE_DIR_NAME,
        }
    }

    /// Suffix appended to the unit name for this variant's output files.
    ///
    /// The exercise PDF carries the bare unit name (`UE01.pdf`); lesson and
    /// solution outputs are disambiguated (`UE01_lesson.pdf`,
    /// `UE01_solution.pdf`).
    pub fn file_suffix(self) -> &'static str {
        match self {
            Variant::Lesson => "_lesson",
            Variant::Exercise => "",
            Variant::Solution => "_solution",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Lesson => "lesson",
            Variant::Exercise => "exercise",
            Variant::Solution => "solution",
        };
        f.write_str(name)
    }
}
