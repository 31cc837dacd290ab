#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use coursetex::compile::{EXERCISE_DIR_NAME, LESSON_DIR_NAME};
use coursetex::config::{ConfigFile, EntryPoints};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    active_semester: String,
    units: Vec<String>,
    lesson_entry_point: String,
    exercise_entry_point: String,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            active_semester: "25WS".to_string(),
            units: Vec::new(),
            lesson_entry_point: "lesson.tex".to_string(),
            exercise_entry_point: "exercise.tex".to_string(),
        }
    }

    pub fn semester(mut self, name: &str) -> Self {
        self.active_semester = name.to_string();
        self
    }

    pub fn with_unit(mut self, name: &str) -> Self {
        self.units.push(name.to_string());
        self
    }

    pub fn lesson_entry_point(mut self, name: &str) -> Self {
        self.lesson_entry_point = name.to_string();
        self
    }

    pub fn exercise_entry_point(mut self, name: &str) -> Self {
        self.exercise_entry_point = name.to_string();
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile {
            active_semester: self.active_semester,
            units: self.units,
            entry_points: EntryPoints {
                lesson: self.lesson_entry_point,
                exercise: self.exercise_entry_point,
            },
        }
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal valid TeX content for fixture entry points.
pub const VALID_TEX_CONTENT: &str = r"\documentclass{article}
\begin{document}
This is just a test document.
\end{document}
";

/// On-disk fixture for one unit under a semester root.
///
/// Creates `<root>/<semester>/<unit>/` and, on request, the lesson and
/// exercise sub-trees with entry-point files.
pub struct UnitFixture {
    dir: PathBuf,
}

impl UnitFixture {
    pub fn create(workdir: &Path, semester: &str, unit: &str) -> Self {
        let dir = workdir.join(semester).join(unit);
        fs::create_dir_all(&dir).expect("creating unit fixture directory");
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn with_lesson(self, entry_point: &str) -> Self {
        self.write_subtree_file(LESSON_DIR_NAME, entry_point, VALID_TEX_CONTENT)
    }

    pub fn with_exercise(self, entry_point: &str) -> Self {
        self.write_subtree_file(EXERCISE_DIR_NAME, entry_point, VALID_TEX_CONTENT)
    }

    /// Write (or overwrite) a file inside one of the unit's sub-trees.
    pub fn write_subtree_file(self, subtree: &str, name: &str, content: &str) -> Self {
        let dir = self.dir.join(subtree);
        fs::create_dir_all(&dir).expect("creating sub-tree directory");
        fs::write(dir.join(name), content).expect("writing sub-tree file");
        self
    }

    pub fn subtree_path(&self, subtree: &str, name: &str) -> PathBuf {
        self.dir.join(subtree).join(name)
    }
}

/// Recursively snapshot a directory as (relative path, contents) pairs,
/// sorted by path. Useful for byte-identical before/after comparisons.
pub fn snapshot_dir(root: &Path) -> Vec<(String, Vec<u8>)> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<(String, Vec<u8>)>) {
        for entry in fs::read_dir(dir).expect("reading fixture directory") {
            let entry = entry.expect("reading fixture entry");
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path
                    .strip_prefix(root)
                    .expect("snapshot path under root")
                    .to_string_lossy()
                    .replace('\\', "/");
                let bytes = fs::read(&path).expect("reading fixture file");
                out.push((rel, bytes));
            }
        }
    }

    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}
