use anyhow::Result;
use tempfile::tempdir;

use crate::{envguard, stderr};

#[test]
fn missing_variables_exit_with_status_1() -> Result<()> {
    let tmpdir = tempdir()?;

    let output = envguard(tmpdir.path())?
        .args(["TEST_VAR", "ANOTHER_VAR"])
        .env_remove("TEST_VAR")
        .env_remove("ANOTHER_VAR")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output)?
            .contains("Missing required environment variables: TEST_VAR, ANOTHER_VAR")
    );
    Ok(())
}

#[test]
fn no_exit_reports_missing_variables() -> Result<()> {
    let tmpdir = tempdir()?;

    let output = envguard(tmpdir.path())?
        .args(["--no-exit", "TEST_VAR", "ANOTHER_VAR"])
        .env("TEST_VAR", "hello")
        .env_remove("ANOTHER_VAR")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output)?;
    assert!(stderr.contains("Missing required environment variables: ANOTHER_VAR"));
    // Reported once by the guard, not again by the CLI.
    assert_eq!(stderr.matches("Missing required").count(), 1);
    Ok(())
}

#[test]
fn present_variables_succeed() -> Result<()> {
    let tmpdir = tempdir()?;

    let output = envguard(tmpdir.path())?
        .args(["TEST_VAR", "ANOTHER_VAR"])
        .env("TEST_VAR", "hello")
        .env("ANOTHER_VAR", "world")
        .output()?;

    assert!(output.status.success());
    assert!(stderr(&output)?.contains("All required environment variables are present"));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn empty_value_is_missing() -> Result<()> {
    let tmpdir = tempdir()?;

    let output = envguard(tmpdir.path())?
        .arg("TEST_VAR")
        .env("TEST_VAR", "")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output)?.contains("Missing required environment variables: TEST_VAR"));
    Ok(())
}

#[test]
fn whitespace_value_is_present() -> Result<()> {
    let tmpdir = tempdir()?;

    let output = envguard(tmpdir.path())?
        .arg("TEST_VAR")
        .env("TEST_VAR", " ")
        .output()?;

    assert!(output.status.success());
    Ok(())
}

#[cfg(unix)]
#[test]
fn non_utf8_value_is_present() -> Result<()> {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let tmpdir = tempdir()?;

    let output = envguard(tmpdir.path())?
        .arg("TEST_VAR")
        .env("TEST_VAR", OsStr::from_bytes(b"\xff"))
        .output()?;

    assert!(output.status.success());
    Ok(())
}

#[test]
fn nothing_required_succeeds() -> Result<()> {
    let tmpdir = tempdir()?;

    let output = envguard(tmpdir.path())?.output()?;

    assert!(output.status.success());
    assert!(stderr(&output)?.contains("No required variables given"));
    Ok(())
}

#[test]
fn names_from_environment_are_appended() -> Result<()> {
    let tmpdir = tempdir()?;

    let output = envguard(tmpdir.path())?
        .arg("FIRST")
        .env("ENVGUARD_REQUIRED", "SECOND, THIRD")
        .env_remove("FIRST")
        .env_remove("SECOND")
        .env("THIRD", "3")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output)?.contains("Missing required environment variables: FIRST, SECOND"));
    Ok(())
}

#[test]
fn quiet_silences_diagnostics() -> Result<()> {
    let tmpdir = tempdir()?;

    let output = envguard(tmpdir.path())?
        .args(["--quiet", "TEST_VAR"])
        .env_remove("TEST_VAR")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stderr.is_empty());
    Ok(())
}
