//! Crate error type.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while building a logger or applying configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// An output path entry was empty.
    #[error("output path must not be empty")]
    EmptyPath,

    /// A sink could not be opened for writing.
    #[error("failed to open sink {path}: {source}")]
    OpenSink {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("config watch error: {0}")]
    Watch(#[from] notify::Error),
}
