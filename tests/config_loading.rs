use std::error::Error;
use std::fs;
use std::path::Path;

use coursetex::config::{default_config_path, load_and_validate, load_from_path, validate_config};
use coursetex_test_utils::builders::ConfigFileBuilder;
use coursetex_test_utils::init_tracing;
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

const DEFAULT_CONFIG_TOML: &str = r#"
active_semester = "25WS"
units = ["UE01", "UE02", "UE03"]

[entry_points]
lesson = "lesson.tex"
exercise = "exercise.tex"
"#;

fn write_config(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("Coursetex.toml");
    fs::write(&path, contents).expect("writing test config");
    path
}

#[test]
fn parse_config() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = write_config(dir.path(), DEFAULT_CONFIG_TOML);
    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.active_semester, "25WS");
    assert_eq!(cfg.units, ["UE01", "UE02", "UE03"]);
    assert_eq!(cfg.entry_points.lesson, "lesson.tex");
    assert_eq!(cfg.entry_points.exercise, "exercise.tex");
    assert_eq!(cfg.semester_root(Path::new(".")), Path::new("./25WS"));

    Ok(())
}

#[test]
fn missing_required_field_is_an_error() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = write_config(
        dir.path(),
        r#"
active_semester = "25WS"
units = ["UE01"]
"#,
    );

    assert!(load_from_path(&path).is_err());
    Ok(())
}

#[test]
fn semester_year_is_parsed() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new().semester("25WS").with_unit("UE01").build();
    assert_eq!(cfg.semester_year()?, 25);

    let cfg = ConfigFileBuilder::new().semester("21SS").with_unit("UE01").build();
    assert_eq!(cfg.semester_year()?, 21);

    Ok(())
}

#[test]
fn invalid_semester_names_are_rejected() {
    init_tracing();

    for name in ["3WS", "2025WS", "25XX", "WS25", ""] {
        let cfg = ConfigFileBuilder::new().semester(name).with_unit("UE01").build();
        assert!(
            cfg.semester_year().is_err(),
            "semester '{name}' should be rejected"
        );
        assert!(validate_config(&cfg).is_err());
    }
}

#[test]
fn validation_rejects_empty_and_duplicate_units() {
    init_tracing();

    let empty = ConfigFileBuilder::new().build();
    assert!(validate_config(&empty).is_err());

    let duplicated = ConfigFileBuilder::new()
        .with_unit("UE01")
        .with_unit("UE01")
        .build();
    assert!(validate_config(&duplicated).is_err());
}

#[test]
fn validation_rejects_entry_points_with_paths() {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .with_unit("UE01")
        .lesson_entry_point("sub/lesson.tex")
        .build();
    assert!(validate_config(&cfg).is_err());

    let cfg = ConfigFileBuilder::new()
        .with_unit("UE01")
        .exercise_entry_point("")
        .build();
    assert!(validate_config(&cfg).is_err());
}

#[test]
fn default_config_path_is_local_toml() {
    assert_eq!(default_config_path(), Path::new("Coursetex.toml"));
}
