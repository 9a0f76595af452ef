//! Configuration schema definitions.
//!
//! The shape matches what the surrounding application's config loader hands
//! over: `{ level, output_paths, error_output_paths }`.

use serde::{Deserialize, Serialize};

use crate::logger::sink::STDERR;

/// Logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Threshold name (`debug` or `info`; anything else means debug).
    pub level: String,

    /// Where records are written. Empty means stderr.
    pub output_paths: Vec<String>,

    /// Where the logger reports its own write failures. Empty means stderr.
    pub error_output_paths: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            output_paths: Vec::new(),
            error_output_paths: Vec::new(),
        }
    }
}

impl LogConfig {
    pub fn resolved_output_paths(&self) -> Vec<String> {
        or_stderr(&self.output_paths)
    }

    pub fn resolved_error_output_paths(&self) -> Vec<String> {
        or_stderr(&self.error_output_paths)
    }
}

fn or_stderr(paths: &[String]) -> Vec<String> {
    if paths.is_empty() {
        vec![STDERR.to_string()]
    } else {
        paths.to_vec()
    }
}
