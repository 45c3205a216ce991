//! End-to-end CLI tests.
//!
//! These run the actual binary with a prepared stdin and check output,
//! exit codes and the generated artifact. Everything runs in demo mode so
//! no network is involved.

#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Answers for: start date, end date, sort key, direction, filename.
const HAPPY_PATH_INPUT: &str = "2024-03-01\n2024-03-07\n2\n2\n\n";

fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("channelpress").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("API_ID")
        .env_remove("API_HASH")
        .env_remove("OUTPUT_DIR")
        .env("DEMO_MODE", "1");
    cmd
}

#[test]
fn demo_export_happy_path() {
    let dir = tempfile::tempdir().unwrap();
    cli(&dir)
        .write_stdin(HAPPY_PATH_INPUT)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Demo mode")
                .and(predicate::str::contains("Report written to")),
        );

    let artifact = dir.path().join("demo_channel_2024-03-01_2024-03-07.pdf");
    assert!(artifact.exists(), "expected {}", artifact.display());
    let bytes = std::fs::read(artifact).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn custom_filename_gets_pdf_extension() {
    let dir = tempfile::tempdir().unwrap();
    cli(&dir)
        .write_stdin("2024-03-01\n2024-03-07\n1\n1\nweekly_report\n")
        .assert()
        .success();

    assert!(dir.path().join("weekly_report.pdf").exists());
}

#[test]
fn invalid_date_is_reprompted() {
    let dir = tempfile::tempdir().unwrap();
    cli(&dir)
        .write_stdin("not-a-date\n2024-03-01\n2024-03-07\n1\n1\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid date"));
}

#[test]
fn inverted_end_date_is_reprompted() {
    let dir = tempfile::tempdir().unwrap();
    cli(&dir)
        .write_stdin("2024-03-07\n2024-03-01\n2024-03-10\n1\n1\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("must not precede"));
}

#[test]
fn truncated_input_fails_with_nonzero_exit() {
    let dir = tempfile::tempdir().unwrap();
    cli(&dir)
        .write_stdin("2024-03-01\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn output_dir_flag_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    cli(&dir)
        .arg("--output-dir")
        .arg("reports")
        .write_stdin(HAPPY_PATH_INPUT)
        .assert()
        .success();

    assert!(
        dir.path()
            .join("reports")
            .join("demo_channel_2024-03-01_2024-03-07.pdf")
            .exists()
    );
}

#[test]
fn demo_flag_forces_demo_even_with_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("channelpress").unwrap();
    cmd.current_dir(dir.path())
        .env("API_ID", "12345")
        .env("API_HASH", "abcdef")
        .env_remove("DEMO_MODE")
        .arg("--demo")
        .write_stdin(HAPPY_PATH_INPUT)
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo mode"));
}
