//! Configuration validation.
//!
//! # Responsibilities
//! - Reject path entries that can never name a sink
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - The level string is never validated; unknown names fall back to debug
//!   when applied

use thiserror::Error;

use crate::config::schema::LogConfig;

/// A semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("output_paths[{0}] is empty")]
    EmptyOutputPath(usize),

    #[error("error_output_paths[{0}] is empty")]
    EmptyErrorOutputPath(usize),
}

/// Check a configuration before it is applied.
pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (i, path) in config.output_paths.iter().enumerate() {
        if path.trim().is_empty() {
            errors.push(ValidationError::EmptyOutputPath(i));
        }
    }
    for (i, path) in config.error_output_paths.iter().enumerate() {
        if path.trim().is_empty() {
            errors.push(ValidationError::EmptyErrorOutputPath(i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
