//! Logger instances.
//!
//! # Data Flow
//! ```text
//! Logger::log(severity, message, fields)
//!     → tracing event (per-severity target)
//!     → level filter (shared AtomicLevel)
//!     → encoder.rs (fixed JSON layout)
//!     → sink.rs (fan-out to output paths)
//! ```
//!
//! # Design Decisions
//! - Each logger owns its own `Dispatch`, so emission never depends on
//!   whatever global subscriber the process installed
//! - The threshold is an `AtomicLevel` shared with the logger, not copied;
//!   changing it never requires a rebuild
//! - Caller locations come from `#[track_caller]`, not event metadata

pub mod encoder;
pub mod field;
pub mod level;
pub mod sink;

use std::panic::Location;

use tracing::{Dispatch, Level};
use tracing_subscriber::filter::dynamic_filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, Layer, Registry};

use crate::config::LogConfig;
use crate::error::Error;
use encoder::{short_caller, RecordFormat};
use field::{EncodedFields, Field};
use level::{AtomicLevel, Severity};
use sink::Sinks;

/// A built logger: sinks, encoder, and threshold behind one dispatcher.
pub struct Logger {
    dispatch: Dispatch,
    level: AtomicLevel,
    output_paths: Vec<String>,
    error_output_paths: Vec<String>,
}

impl Logger {
    /// Build a logger with its own threshold parsed from `config.level`.
    pub fn build(config: &LogConfig) -> Result<Self, Error> {
        let level = AtomicLevel::new(level::parse_level(&config.level));
        Self::with_level(config, level)
    }

    /// Build a logger that filters against an existing shared threshold.
    ///
    /// `config.level` is ignored; the caller owns the threshold.
    pub fn with_level(config: &LogConfig, level: AtomicLevel) -> Result<Self, Error> {
        let output_paths = config.resolved_output_paths();
        let error_output_paths = config.resolved_error_output_paths();
        let sinks = Sinks::new(
            sink::open_all(&output_paths)?,
            sink::open_all(&error_output_paths)?,
        );

        let threshold = level.clone();
        let layer = fmt::layer()
            .event_format(RecordFormat::new())
            .with_writer(sinks)
            .log_internal_errors(false)
            .with_filter(dynamic_filter_fn(move |metadata, _cx| {
                threshold.enabled(Severity::of(metadata))
            }));

        Ok(Self {
            dispatch: Dispatch::new(Registry::default().with(layer)),
            level,
            output_paths,
            error_output_paths,
        })
    }

    /// The threshold this logger filters against.
    pub fn level(&self) -> &AtomicLevel {
        &self.level
    }

    pub fn output_paths(&self) -> &[String] {
        &self.output_paths
    }

    pub fn error_output_paths(&self) -> &[String] {
        &self.error_output_paths
    }

    /// The underlying dispatcher, e.g. for `tracing::dispatcher::set_global_default`.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `f` with this logger as the thread's default dispatcher.
    ///
    /// Plain `tracing` events inside `f` are encoded like facade records.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Emit one record. Filtering happens in the dispatcher.
    pub fn log(&self, severity: Severity, message: &str, fields: &[Field], caller: &Location<'_>) {
        let caller = short_caller(caller.file(), caller.line());
        let fields = EncodedFields(fields);
        self.in_scope(|| match severity {
            Severity::Debug => tracing::event!(
                target: level::DEBUG_TARGET, Level::DEBUG,
                caller = %caller, fields = %fields, "{}", message
            ),
            Severity::Info => tracing::event!(
                target: level::INFO_TARGET, Level::INFO,
                caller = %caller, fields = %fields, "{}", message
            ),
            Severity::Warn => tracing::event!(
                target: level::WARN_TARGET, Level::WARN,
                caller = %caller, fields = %fields, "{}", message
            ),
            Severity::Error => tracing::event!(
                target: level::ERROR_TARGET, Level::ERROR,
                caller = %caller, fields = %fields, "{}", message
            ),
            Severity::DPanic => tracing::event!(
                target: level::DPANIC_TARGET, Level::ERROR,
                caller = %caller, fields = %fields, "{}", message
            ),
            Severity::Panic => tracing::event!(
                target: level::PANIC_TARGET, Level::ERROR,
                caller = %caller, fields = %fields, "{}", message
            ),
        });
    }

    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.log(Severity::Debug, message, fields, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field]) {
        self.log(Severity::Info, message, fields, Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.log(Severity::Warn, message, fields, Location::caller());
    }

    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field]) {
        self.log(Severity::Error, message, fields, Location::caller());
    }

    /// Log at DPANIC without panicking.
    #[track_caller]
    pub fn dpanic(&self, message: &str, fields: &[Field]) {
        self.log(Severity::DPanic, message, fields, Location::caller());
    }

    /// Log at PANIC, then panic with `message`.
    #[track_caller]
    pub fn panic(&self, message: &str, fields: &[Field]) -> ! {
        self.log(Severity::Panic, message, fields, Location::caller());
        panic!("{message}");
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level.get())
            .field("output_paths", &self.output_paths)
            .field("error_output_paths", &self.error_output_paths)
            .finish()
    }
}
