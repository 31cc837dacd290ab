use std::error::Error;
use std::fs;

use coursetex::hash::{clear_checksum, read_checksum, write_checksum, CHECKSUM_FILE_NAME};
use coursetex_test_utils::init_tracing;
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn read_missing_checksum_is_absent() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    assert_eq!(read_checksum(dir.path()), None);
    Ok(())
}

#[test]
fn write_then_read_round_trips() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    write_checksum(dir.path(), "my-custom-hash")?;

    assert!(dir.path().join(CHECKSUM_FILE_NAME).is_file());
    assert_eq!(read_checksum(dir.path()).as_deref(), Some("my-custom-hash"));
    Ok(())
}

#[test]
fn write_overwrites_previous_digest() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    write_checksum(dir.path(), "first")?;
    write_checksum(dir.path(), "second")?;

    assert_eq!(read_checksum(dir.path()).as_deref(), Some("second"));
    Ok(())
}

#[test]
fn read_trims_whitespace() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    fs::write(dir.path().join(CHECKSUM_FILE_NAME), "somehash\n")?;

    assert_eq!(read_checksum(dir.path()).as_deref(), Some("somehash"));
    Ok(())
}

#[test]
fn unreadable_checksum_is_treated_as_absent() -> TestResult {
    init_tracing();

    // A directory where the checksum file should be makes the read fail
    // with something other than NotFound; that must still mean "never
    // built", not an error.
    let dir = tempdir()?;
    fs::create_dir(dir.path().join(CHECKSUM_FILE_NAME))?;

    assert_eq!(read_checksum(dir.path()), None);
    Ok(())
}

#[test]
fn clear_removes_the_record() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    write_checksum(dir.path(), "digest")?;
    clear_checksum(dir.path())?;

    assert_eq!(read_checksum(dir.path()), None);

    // Clearing an already-absent record is a no-op.
    clear_checksum(dir.path())?;
    Ok(())
}
