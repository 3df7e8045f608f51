//! End-to-end tests running the `timed` binary against a temporary home.
//!
//! Each test gets its own `HOME`, so the default `~/.timed` log lands in a
//! temp directory.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn timed_binary() -> String {
    env!("CARGO_BIN_EXE_timed").to_string()
}

fn timed(home: &Path, args: &[&str]) -> Output {
    Command::new(timed_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("TIMED_LOG_PATH")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run timed")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "timed should succeed: {}",
        stderr(output)
    );
}

/// The log is created empty on first run.
#[test]
fn test_first_run_creates_log() {
    let temp = TempDir::new().unwrap();
    let output = timed(temp.path(), &[]);
    assert_success(&output);

    assert_eq!(stdout(&output), "log empty\n");
    let log = temp.path().join(".timed");
    assert_eq!(std::fs::read_to_string(log).unwrap(), "");
}

/// Start, check status, stop, summarize.
#[test]
fn test_start_stop_cycle() {
    let temp = TempDir::new().unwrap();

    let output = timed(temp.path(), &["start", "proj"]);
    assert_success(&output);
    assert!(stdout(&output).starts_with("starting work on proj\n  at "));

    let output = timed(temp.path(), &["status"]);
    assert_success(&output);
    assert!(stdout(&output).starts_with("working on proj:\n"));

    let output = timed(temp.path(), &["-q"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "proj\n");

    let output = timed(temp.path(), &["stop"]);
    assert_success(&output);
    assert!(stdout(&output).starts_with("worked on proj\n"));

    let content = std::fs::read_to_string(temp.path().join(".timed")).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("proj: "));
    assert!(!content.ends_with(" - "), "entry should be closed: {content:?}");

    let output = timed(temp.path(), &["summary"]);
    assert_success(&output);
    assert!(stdout(&output).starts_with("  - proj: "));
}

/// A second start without a stop is refused and leaves the log alone.
#[test]
fn test_double_start_rejected() {
    let temp = TempDir::new().unwrap();
    assert_success(&timed(temp.path(), &["start", "a"]));
    let before = std::fs::read_to_string(temp.path().join(".timed")).unwrap();

    let output = timed(temp.path(), &["start", "b"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("already working on a"));

    let after = std::fs::read_to_string(temp.path().join(".timed")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_stop_without_start_fails() {
    let temp = TempDir::new().unwrap();
    let output = timed(temp.path(), &["stop"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no active project"));
}

#[test]
fn test_restart_resumes_last_project() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(".timed"),
        "work: 09:00 on 01 Jan 2024 - 10:30 on 01 Jan 2024",
    )
    .unwrap();

    let output = timed(temp.path(), &["restart"]);
    assert_success(&output);
    assert!(stdout(&output).starts_with("starting work on work\n"));

    let content = std::fs::read_to_string(temp.path().join(".timed")).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "work: 09:00 on 01 Jan 2024 - 10:30 on 01 Jan 2024");
    assert!(lines[1].starts_with("work: ") && lines[1].ends_with(" - "));
}

#[test]
fn test_report_by_week() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(".timed"),
        "work: 09:00 on 01 Jan 2024 - 10:30 on 01 Jan 2024\n\
         home: 18:00 on 07 Jan 2024 - 18:30 on 07 Jan 2024\n\
         work: 09:00 on 08 Jan 2024 - 09:45 on 08 Jan 2024",
    )
    .unwrap();

    let output = timed(temp.path(), &["report", "-w"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "2024-01-01 to 2024-01-07 - 2h0m\n    - home: 0h30m\n    - work: 1h30m\n\n\
         2024-01-08 to 2024-01-14 - 0h45m\n    - work: 0h45m\n"
    );
}

#[test]
fn test_report_flags_are_exclusive() {
    let temp = TempDir::new().unwrap();
    let output = timed(temp.path(), &["report", "-d", "-m"]);
    assert!(!output.status.success());
}

#[test]
fn test_summary_json() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(".timed"),
        "work: 09:00 on 01 Jan 2024 - 10:30 on 01 Jan 2024",
    )
    .unwrap();

    let output = timed(temp.path(), &["summary", "--json"]);
    assert_success(&output);
    let json = stdout(&output);
    assert!(json.contains("\"project\": \"work\""), "{json}");
    assert!(json.contains("\"total_minutes\": 90"), "{json}");
}

#[test]
fn test_malformed_log_aborts() {
    let temp = TempDir::new().unwrap();
    let original = "work: 09:00 on 01 Jan 2024 - 10:30 on 01 Jan 2024\nnoSeparatorHere";
    std::fs::write(temp.path().join(".timed"), original).unwrap();

    let output = timed(temp.path(), &["start", "x"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("line 2"), "{}", stderr(&output));

    let after = std::fs::read_to_string(temp.path().join(".timed")).unwrap();
    assert_eq!(after, original);
}

#[test]
fn test_version_does_not_touch_log() {
    let temp = TempDir::new().unwrap();
    let output = timed(temp.path(), &["-v"]);
    assert_success(&output);
    assert!(stdout(&output).starts_with("timed "));
    assert!(!temp.path().join(".timed").exists());
}

#[test]
fn test_log_path_from_env() {
    let temp = TempDir::new().unwrap();
    let custom = temp.path().join("logs/work.log");

    let output = Command::new(timed_binary())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env("TIMED_LOG_PATH", &custom)
        .args(["start", "proj"])
        .output()
        .unwrap();
    assert_success(&output);

    assert!(custom.exists());
    assert!(!temp.path().join(".timed").exists());
}

/// An open entry followed by more entries is reported, not silently counted.
#[test]
fn test_open_entry_before_last_rejected() {
    let temp = TempDir::new().unwrap();
    let original = "a: 09:00 on 01 Jan 2024 - \nb: 10:00 on 01 Jan 2024 - 11:00 on 01 Jan 2024";
    std::fs::write(temp.path().join(".timed"), original).unwrap();

    let output = timed(temp.path(), &["start", "c"]);
    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("line 1: open entry is not the last entry"),
        "{}",
        stderr(&output)
    );

    let output = timed(temp.path(), &["summary"]);
    assert!(!output.status.success());

    let after = std::fs::read_to_string(temp.path().join(".timed")).unwrap();
    assert_eq!(after, original);
}
