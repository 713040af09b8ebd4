//! Smoke tests for argument handling and the error report (no database needed)

use assert_cmd::Command;
use predicates::prelude::*;

fn university() -> Command {
    let mut cmd = Command::cargo_bin("university").unwrap();
    // Keep the caller's environment from redirecting the endpoint
    cmd.env_remove("UNIVERSITY_DB_HOST")
        .env_remove("UNIVERSITY_DB_PORT")
        .env_remove("UNIVERSITY_DB_DATABASE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_credentials() {
    university()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USERNAME"))
        .stdout(predicate::str::contains("PASSWORD"))
        .stdout(predicate::str::contains("Instructor passed to Count_Courses"));
}

#[test]
fn test_missing_password_is_usage_error() {
    university()
        .arg("alice")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PASSWORD"));
}

#[test]
fn test_unreachable_endpoint_prints_error_report() {
    university()
        .args(["--host", "127.0.0.1", "--port", "1", "alice", "secret"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("getConnection SQLException: "))
        .stdout(predicate::str::contains("getConnection SQLState: 08S01"))
        .stdout(predicate::str::contains("getConnection VendorError: 0"))
        .stdout(predicate::str::contains("getInstructor ...").not());
}

#[test]
fn test_missing_config_file_is_reported() {
    university()
        .args(["--config", "/nonexistent/university.toml", "alice", "secret"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("main SQLException: Configuration error"))
        .stdout(predicate::str::contains("main SQLState: null"));
}
