//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::LogConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a file.
///
/// `.json` files are read as JSON; anything else as TOML.
pub fn load_config(path: &Path) -> Result<LogConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config: LogConfig = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.toml");
        fs::write(
            &path,
            "level = \"info\"\noutput_paths = [\"stdout\", \"app.log\"]\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.output_paths, vec!["stdout", "app.log"]);
        assert!(config.error_output_paths.is_empty());
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, r#"{"level":"debug","error_output_paths":["stdout"]}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.error_output_paths, vec!["stdout"]);
    }

    #[test]
    fn test_validation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.toml");
        fs::write(&path, "output_paths = [\"\"]\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 1));
        assert_eq!(err.to_string(), "Validation failed: output_paths[0] is empty");
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
