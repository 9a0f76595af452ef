//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML/JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LogConfig (validated, immutable)
//!     → facade::configure (logger rebuilt and swapped in)
//!
//! On change:
//!     watcher.rs detects change
//!     → reload() runs the same pipeline, swapping only on success
//! ```
//!
//! # Design Decisions
//! - Config is immutable once applied; changes require a full rebuild
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

use std::path::Path;

pub use loader::{load_config, ConfigError};
pub use schema::LogConfig;
pub use watcher::ConfigWatcher;

use crate::error::Error;

/// Load a configuration file and apply it to the process-wide logger.
///
/// A file that fails to load, or names a sink that cannot be opened, leaves
/// the current logger and threshold untouched.
pub fn reload(path: &Path) -> Result<(), Error> {
    let config = load_config(path)?;
    crate::facade::try_configure(&config)
}

