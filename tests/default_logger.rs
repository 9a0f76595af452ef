//! Emission before any configuration goes through the lazily built default
//! logger: JSON records on stderr at the debug threshold.
//!
//! The check re-runs this test binary with only the emitting test selected,
//! so the child process has never been configured and its stderr can be read.

use std::process::Command;

use logfacade::Field;

const CHILD_ENV: &str = "LOGFACADE_EMIT_UNCONFIGURED";

#[test]
fn child_emits_without_configure() {
    if std::env::var_os(CHILD_ENV).is_none() {
        return;
    }
    logfacade::debug("unconfigured", &[Field::uint("n", 7)]);
}

#[test]
fn test_emit_before_configure_writes_json_to_stderr() {
    let output = Command::new(std::env::current_exe().unwrap())
        .args(["--exact", "child_emits_without_configure", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap();
    assert!(output.status.success(), "child failed: {output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().filter(|line| line.starts_with('{')).collect();
    assert_eq!(lines.len(), 1, "stderr was {stderr:?}");

    let line = lines[0];
    let positions: Vec<usize> = ["\"level\":", "\"time\":", "\"caller\":", "\"message\":"]
        .iter()
        .map(|key| line.find(key).unwrap_or_else(|| panic!("{key} missing in {line}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "key order in {line}");

    let record: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(record["level"], "DEBUG");
    assert_eq!(record["message"], "unconfigured");
    assert_eq!(record["n"], 7);
    assert!(record["caller"].as_str().unwrap().starts_with("tests/default_logger.rs:"));

    // Nothing is written to stdout by the default logger.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.lines().any(|line| line.starts_with('{')), "stdout was {stdout:?}");
}
