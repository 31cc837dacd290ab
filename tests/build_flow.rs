use std::error::Error;
use std::fs;

use coursetex::build::{run_build, RunOptions, UnitOutcome, VariantStatus};
use coursetex::hash::{read_checksum, CHECKSUM_FILE_NAME};
use coursetex::report::{write_action_output, BuildReport};
use coursetex_test_utils::builders::{snapshot_dir, ConfigFileBuilder, UnitFixture};
use coursetex_test_utils::fake_compiler::FakeCompiler;
use coursetex_test_utils::init_tracing;
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

fn outcome<'a>(report: &'a BuildReport, unit: &str) -> &'a UnitOutcome {
    report
        .entries()
        .iter()
        .find(|(u, _)| u.as_str() == unit)
        .map(|(_, o)| o)
        .unwrap_or_else(|| panic!("no outcome recorded for unit '{unit}'"))
}

#[test]
fn cold_build_runs_all_variants_and_rerun_skips() -> TestResult {
    init_tracing();

    let workdir = tempdir()?;
    let cfg = ConfigFileBuilder::new().with_unit("UE01").build();
    let fixture = UnitFixture::create(workdir.path(), "25WS", "UE01")
        .with_lesson("lesson.tex")
        .with_exercise("exercise.tex");

    let compiler = FakeCompiler::new();
    let report = run_build(&cfg, workdir.path(), &compiler, &RunOptions::default())?;

    // All three variants, in the fixed order.
    assert_eq!(
        compiler.compiled_names(),
        ["UE01_lesson", "UE01", "UE01_solution"]
    );

    assert!(report.success());
    assert_eq!(report.changed_units(), ["UE01"]);
    assert_eq!(report.changed_units_csv(), "UE01");

    // Artifacts and logs were promoted to their canonical paths.
    assert!(fixture.subtree_path("Unterricht", "UE01_lesson.pdf").is_file());
    assert!(fixture.subtree_path("Unterricht", "UE01_lesson.build_log").is_file());
    assert!(fixture.subtree_path("Aufgabe", "UE01.pdf").is_file());
    assert!(fixture.subtree_path("Aufgabe", "UE01_solution.pdf").is_file());

    // The checksum was written as the last step of the successful build.
    assert!(read_checksum(fixture.dir()).is_some());

    // Re-running immediately: nothing compiled, nothing changed.
    let second = FakeCompiler::new();
    let report = run_build(&cfg, workdir.path(), &second, &RunOptions::default())?;

    assert!(second.compiled_names().is_empty());
    assert!(report.success());
    assert!(report.changed_units().is_empty());
    assert_eq!(*outcome(&report, "UE01"), UnitOutcome::SkippedUpToDate);

    Ok(())
}

#[test]
fn lesson_only_unit_attempts_exactly_one_variant() -> TestResult {
    init_tracing();

    let workdir = tempdir()?;
    let cfg = ConfigFileBuilder::new().with_unit("UE02").build();
    UnitFixture::create(workdir.path(), "25WS", "UE02").with_lesson("lesson.tex");

    let compiler = FakeCompiler::new();
    let report = run_build(&cfg, workdir.path(), &compiler, &RunOptions::default())?;

    assert_eq!(compiler.compiled_names(), ["UE02_lesson"]);
    assert!(report.success());

    match outcome(&report, "UE02") {
        UnitOutcome::Succeeded { variants, changed } => {
            assert!(*changed);
            let statuses: Vec<VariantStatus> = variants.iter().map(|v| v.status).collect();
            assert_eq!(
                statuses,
                [
                    VariantStatus::Built,
                    VariantStatus::Skipped,
                    VariantStatus::Skipped,
                ]
            );
        }
        other => panic!("expected success, got {other:?}"),
    }

    Ok(())
}

#[test]
fn failed_unit_is_rolled_back_and_isolated() -> TestResult {
    init_tracing();

    let workdir = tempdir()?;
    let cfg = ConfigFileBuilder::new()
        .with_unit("UE01")
        .with_unit("UE02")
        .build();

    let good = UnitFixture::create(workdir.path(), "25WS", "UE01")
        .with_lesson("lesson.tex")
        .with_exercise("exercise.tex");
    let broken = UnitFixture::create(workdir.path(), "25WS", "UE02")
        .with_lesson("lesson.tex")
        .with_exercise("exercise.tex");

    let before = snapshot_dir(broken.dir());

    // The solution variant of UE02 fails and even leaves a partial artifact
    // in its output directory.
    let compiler = FakeCompiler::new()
        .fail_for("UE02_solution")
        .with_partial_on_failure();
    let report = run_build(&cfg, workdir.path(), &compiler, &RunOptions::default())?;

    // No short-circuit: both units were processed.
    assert_eq!(report.entries().len(), 2);
    assert!(!report.success());
    assert_eq!(report.failed_units(), ["UE02"]);

    // UE01's success is committed.
    assert!(read_checksum(good.dir()).is_some());
    assert!(good.subtree_path("Aufgabe", "UE01.pdf").is_file());
    assert_eq!(report.changed_units(), ["UE01"]);

    // UE02 is byte-identical to its pre-run state: no artifacts, no logs,
    // no checksum, no leftover staging.
    assert_eq!(before, snapshot_dir(broken.dir()));
    assert_eq!(read_checksum(broken.dir()), None);

    // The next run retries UE02 from scratch.
    let retry = FakeCompiler::new();
    let report = run_build(&cfg, workdir.path(), &retry, &RunOptions::default())?;
    assert!(report.success());
    assert_eq!(
        retry.compiled_names(),
        ["UE02_lesson", "UE02", "UE02_solution"]
    );
    assert_eq!(report.changed_units(), ["UE02"]);

    Ok(())
}

#[test]
fn successful_compile_without_artifact_is_a_failure() -> TestResult {
    init_tracing();

    let workdir = tempdir()?;
    let cfg = ConfigFileBuilder::new().with_unit("UE01").build();
    let fixture = UnitFixture::create(workdir.path(), "25WS", "UE01").with_exercise("exercise.tex");

    let compiler = FakeCompiler::new().no_artifact_for("UE01");
    let report = run_build(&cfg, workdir.path(), &compiler, &RunOptions::default())?;

    assert!(!report.success());
    assert!(outcome(&report, "UE01").is_failure());
    assert_eq!(read_checksum(fixture.dir()), None);

    Ok(())
}

#[test]
fn missing_unit_directory_is_trivially_successful() -> TestResult {
    init_tracing();

    let workdir = tempdir()?;
    let cfg = ConfigFileBuilder::new().with_unit("UE09").build();
    fs::create_dir_all(workdir.path().join("25WS"))?;

    let compiler = FakeCompiler::new();
    let report = run_build(&cfg, workdir.path(), &compiler, &RunOptions::default())?;

    assert!(compiler.compiled_names().is_empty());
    assert!(report.success());
    assert!(report.changed_units().is_empty());
    assert!(!outcome(&report, "UE09").is_failure());

    Ok(())
}

#[test]
fn units_not_listed_in_config_are_ignored() -> TestResult {
    init_tracing();

    let workdir = tempdir()?;
    let cfg = ConfigFileBuilder::new().with_unit("UE01").build();
    UnitFixture::create(workdir.path(), "25WS", "UE01").with_lesson("lesson.tex");
    // Present on disk, not listed: the not-yet-released exercise.
    UnitFixture::create(workdir.path(), "25WS", "UE99").with_lesson("lesson.tex");

    let compiler = FakeCompiler::new();
    let report = run_build(&cfg, workdir.path(), &compiler, &RunOptions::default())?;

    assert_eq!(compiler.compiled_names(), ["UE01_lesson"]);
    assert_eq!(report.entries().len(), 1);

    Ok(())
}

#[test]
fn source_change_triggers_rebuild() -> TestResult {
    init_tracing();

    let workdir = tempdir()?;
    let cfg = ConfigFileBuilder::new().with_unit("UE01").build();
    let fixture = UnitFixture::create(workdir.path(), "25WS", "UE01").with_exercise("exercise.tex");

    run_build(&cfg, workdir.path(), &FakeCompiler::new(), &RunOptions::default())?;

    // Rewriting a generated artifact does not count as a source change...
    fs::write(
        fixture.subtree_path("Aufgabe", "UE01.pdf"),
        "%PDF-1.5 regenerated",
    )?;
    let compiler = FakeCompiler::new();
    let report = run_build(&cfg, workdir.path(), &compiler, &RunOptions::default())?;
    assert!(compiler.compiled_names().is_empty());
    assert_eq!(*outcome(&report, "UE01"), UnitOutcome::SkippedUpToDate);

    // ...but editing a source file does.
    fs::write(
        fixture.subtree_path("Aufgabe", "exercise.tex"),
        "\\documentclass{article}\\begin{document}edited\\end{document}",
    )?;
    let compiler = FakeCompiler::new();
    let report = run_build(&cfg, workdir.path(), &compiler, &RunOptions::default())?;
    assert_eq!(compiler.compiled_names(), ["UE01", "UE01_solution"]);
    assert_eq!(report.changed_units(), ["UE01"]);

    Ok(())
}

#[test]
fn fail_fast_stops_after_first_failed_unit() -> TestResult {
    init_tracing();

    let workdir = tempdir()?;
    let cfg = ConfigFileBuilder::new()
        .with_unit("UE01")
        .with_unit("UE02")
        .build();
    UnitFixture::create(workdir.path(), "25WS", "UE01").with_exercise("exercise.tex");
    UnitFixture::create(workdir.path(), "25WS", "UE02").with_exercise("exercise.tex");

    let compiler = FakeCompiler::new().fail_for("UE01");
    let options = RunOptions { fail_fast: true };
    let report = run_build(&cfg, workdir.path(), &compiler, &options)?;

    assert!(!report.success());
    assert_eq!(report.entries().len(), 1);
    assert!(!compiler.compiled_names().iter().any(|n| n.starts_with("UE02")));

    Ok(())
}

#[test]
fn failed_checksum_write_surfaces_as_unit_failure() -> TestResult {
    init_tracing();

    let workdir = tempdir()?;
    let cfg = ConfigFileBuilder::new().with_unit("UE01").build();
    let fixture = UnitFixture::create(workdir.path(), "25WS", "UE01").with_exercise("exercise.tex");

    // A directory squatting on the checksum path makes the final write
    // fail; a claimed success with no checksum would mean a false
    // "up to date" later, so this must fail loud.
    fs::create_dir(fixture.dir().join(CHECKSUM_FILE_NAME))?;

    let compiler = FakeCompiler::new();
    let report = run_build(&cfg, workdir.path(), &compiler, &RunOptions::default())?;

    assert!(!report.success());
    assert!(outcome(&report, "UE01").is_failure());

    Ok(())
}

#[test]
fn action_output_is_appended_to_github_output() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let out_path = dir.path().join("gh_output");

    let mut report = BuildReport::new();
    report.record(
        "UE01",
        UnitOutcome::Succeeded {
            variants: Vec::new(),
            changed: true,
        },
    );
    report.record("UE02", UnitOutcome::SkippedUpToDate);

    unsafe { std::env::set_var("GITHUB_OUTPUT", &out_path) };
    let result = write_action_output(&report);
    unsafe { std::env::remove_var("GITHUB_OUTPUT") };
    result?;

    let contents = fs::read_to_string(&out_path)?;
    assert_eq!(contents, "changed-units=UE01\n");

    Ok(())
}
