//! Shared utilities for integration tests.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use logfacade::LogConfig;
use serde_json::Value;

static FACADE: Mutex<()> = Mutex::new(());

/// Serialize tests that touch the process-wide logger.
pub fn lock_facade() -> MutexGuard<'static, ()> {
    FACADE.lock().unwrap_or_else(|e| e.into_inner())
}

/// Config writing every record to `path`.
pub fn file_config(path: &Path, level: &str) -> LogConfig {
    LogConfig {
        level: level.to_string(),
        output_paths: vec![path.to_string_lossy().into_owned()],
        error_output_paths: Vec::new(),
    }
}

/// Path of a log file inside `dir`.
pub fn log_path(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

/// Every line of `path` parsed as JSON. Panics on a corrupt line.
pub fn records(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|line| {
            serde_json::from_str(line).unwrap_or_else(|e| panic!("corrupt record {line:?}: {e}"))
        })
        .collect()
}

/// Messages of every record in `path`, in order.
#[allow(dead_code)]
pub fn messages(path: &Path) -> Vec<String> {
    records(path)
        .iter()
        .map(|r| r["message"].as_str().unwrap_or_default().to_string())
        .collect()
}
