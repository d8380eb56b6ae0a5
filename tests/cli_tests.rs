#![cfg(feature = "cli_api")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

#[test]
fn cli_adds_catalog_records() {
    run_cli("role Engineer\nres JDO Jane role-1\nproject ACME Acme\nquit\n")
        .success()
        .stdout(str_contains("Added role role-1."))
        .stdout(str_contains("Added resource res-1 (JDO)."))
        .stdout(str_contains("Added project prj-1 (ACME)."));
}

#[test]
fn cli_reports_available_status_without_allocations() {
    run_cli("role Engineer\nres JDO Jane role-1\nstatus JDO\nquit\n")
        .success()
        .stdout(str_contains("Status   : available"))
        .stdout(str_contains("Workload : 0%"));
}

#[test]
fn cli_records_hours_and_shows_the_grid() {
    run_cli(
        "role Engineer\nproject ACME Acme\nalloc ACME role-1 2025 6 1 12.5 8.0\nshow\nquit\n",
    )
    .success()
    .stdout(str_contains("Recorded hours on"))
    .stdout(str_contains("12.5"));
}

#[test]
fn cli_rejects_unknown_references() {
    run_cli("alloc NOPE role-1 2025 6 1 8\nquit\n")
        .success()
        .stdout(str_contains("Unknown project code NOPE"));
}

#[test]
fn cli_rejects_inverted_leave_dates() {
    run_cli(
        "role Engineer\nres JDO Jane role-1\nleave JDO 2025-06-20 2025-06-10\nquit\n",
    )
    .success()
    .stdout(str_contains("start date 2025-06-20 is after end date 2025-06-10"));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "role Engineer\nproject ACME Acme\nalloc ACME role-1 2025 6 1 12.5\nsave json {}\nalloc ACME role-1 2025 6 2 4.0\nload json {}\nshow\nquit\n",
        path, path
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(
        output.contains("Tracker loaded from"),
        "expected output to mention load completion"
    );
    let after_reload = output.split("Tracker loaded from").last().unwrap_or_default();
    assert!(
        after_reload.contains("12.5"),
        "persisted row should survive reload:\n{after_reload}"
    );
    assert!(
        !after_reload.contains("4.0"),
        "row added after save should not appear after reload:\n{after_reload}"
    );
}

#[test]
fn cli_suggests_project_codes() {
    run_cli("code Internal Tools\nquit\n")
        .success()
        .stdout(str_contains("INTTOO"));
}
