//! The `ctxlog` binary end to end.

use std::process::{Command, Output};

use serde_json::Value;

fn ctxlog(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ctxlog"))
        .args(args)
        .env_remove("LOG_LEVEL")
        .env_remove("CTXLOG_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run ctxlog")
}

fn stdout_records(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}

#[test]
fn test_fatal_logs_then_exits_with_status_one() {
    let output = ctxlog(&["emit", "fatal", "boom"]);

    assert_eq!(output.status.code(), Some(1));
    let records = stdout_records(&output);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["severity"], "fatal");
    assert_eq!(record["message"], "boom");
    assert!(record["File"].as_str().unwrap().ends_with("ctxlog.rs"));
    assert!(record["Line"].as_u64().unwrap() > 0);
}

#[test]
fn test_level_flag_filters_records() {
    let output = ctxlog(&["--level", "warn", "emit", "info", "x"]);

    assert!(output.status.success());
    assert!(stdout_records(&output).is_empty());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_emit_writes_context_as_top_level_keys() {
    let output = ctxlog(&[
        "emit",
        "warn",
        "--correlation-id",
        "abc123",
        "--tenant-id",
        "acme",
        "--area",
        "billing",
        "--field",
        "attempt=2",
        "card",
        "declined",
    ]);

    assert!(output.status.success());
    let records = stdout_records(&output);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["message"], "card declined");
    assert_eq!(record["severity"], "warn");
    assert_eq!(record["CorrelationID"], "abc123");
    assert_eq!(record["TenantID"], "acme");
    assert_eq!(record["Area"], "billing");
    assert_eq!(record["attempt"], "2");
    assert!(record.get("File").is_none());
}

#[test]
fn test_text_format_flag() {
    let output = ctxlog(&["--format", "text", "emit", "info", "plain"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("plain"));
    assert!(stdout_records(&output).is_empty());
}

#[test]
fn test_unknown_format_is_rejected() {
    let output = ctxlog(&["--format", "yaml", "emit", "info", "x"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_levels_lists_every_severity() {
    let output = ctxlog(&["levels"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "0\tpanic");
    assert_eq!(lines[6], "6\ttrace");
}
