//! Process-wide structured JSON logging.
//!
//! A thin facade over `tracing`/`tracing-subscriber`: leveled emission,
//! a threshold that can change at runtime, and configurable output paths.
//!
//! ```no_run
//! use logfacade::{Field, LogConfig};
//!
//! logfacade::configure(&LogConfig {
//!     level: "info".into(),
//!     output_paths: vec!["stdout".into()],
//!     ..LogConfig::default()
//! })
//! .expect("log config");
//!
//! logfacade::info("listening", &[Field::uint("port", 8080)]);
//! logfacade::set_level("debug");
//! ```

pub mod config;
pub mod error;
pub mod facade;
pub mod logger;

pub use config::LogConfig;
pub use error::Error;
pub use facade::{
    configure, current_level, debug, dpanic, error, info, panic, set_level, try_configure, warn,
};
pub use logger::field::{Field, Value};
pub use logger::level::{parse_level, AtomicLevel, Severity};
pub use logger::Logger;
