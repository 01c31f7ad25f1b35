//! Basic CLI E2E tests.
//!
//! Tests run the built binary and verify outputs. Every test passes
//! `--config` so the user's settings are never read or written.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command with `stdin` piped in and return (stdout, stderr, code).
fn run_cli(args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_puppy-cli"))
        .args(args)
        .env_remove("PUPPY_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn config_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_run_status_shows_full_gauges() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_arg(&dir.path().join("config.toml"));
    let (stdout, _, code) = run_cli(&["--config", &cfg, "run"], "pet\nstatus\nquit\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("pat x1"));
    assert!(stdout.contains("Mood: 5\nEnergy: 5\nYour puppy is happy now"));
    assert!(stdout.contains("Bye!"));
}

#[test]
fn test_run_json_emits_events() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_arg(&dir.path().join("config.toml"));
    let (stdout, _, code) = run_cli(&["--config", &cfg, "run", "--json", "--seed", "1"], "idle\n");
    assert_eq!(code, 0);

    let values: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("every line is JSON"))
        .collect();
    assert_eq!(values[0]["type"], "Status");
    // The day plan covers every hour, so the puppy never starts idle.
    assert_eq!(values[1]["type"], "ActivityChanged");
    assert_eq!(values[1]["to"], "idle");
}

#[test]
fn test_run_reset_once_per_day() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_arg(&dir.path().join("config.toml"));
    let (stdout, _, code) = run_cli(&["--config", &cfg, "run"], "reset\ny\nreset\nyes\nquit\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Reset successfully!"));
    assert!(stdout.contains("No chance to reset... Just enjoy your day!"));
}

#[test]
fn test_run_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[petting]\nthreshold_min = 9\nthreshold_max = 3\n").unwrap();
    let (_, stderr, code) = run_cli(&["--config", &config_arg(&path), "run"], "");
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("petting.threshold_max"));
}

#[test]
fn test_config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_arg(&dir.path().join("config.toml"));

    let (stdout, _, code) = run_cli(&["--config", &cfg, "config", "set", "bubble.max_chars", "4"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, code) = run_cli(&["--config", &cfg, "config", "get", "bubble.max_chars"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "4");

    let (stdout, _, _) = run_cli(&["--config", &cfg, "run"], "say abcdefgh\nquit\n");
    assert!(stdout.contains("bubble: abcd\n"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_arg(&dir.path().join("config.toml"));
    let (_, stderr, code) = run_cli(&["--config", &cfg, "config", "get", "petting.nope"], "");
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key: petting.nope"));
}

#[test]
fn test_schedule_for_hour() {
    let (stdout, _, code) = run_cli(&["schedule", "--hour", "19"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "guitar");

    let (_, stderr, code) = run_cli(&["schedule", "--hour", "24"], "");
    assert_eq!(code, 1);
    assert!(stderr.contains("hour must be 0-23"));
}

#[test]
fn test_completions() {
    let (stdout, _, code) = run_cli(&["completions", "bash"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("puppy-cli"));
}
