//! Process-wide logging facade.
//!
//! # Responsibilities
//! - Hold the process-wide logger and threshold
//! - Build a default logger on first use when nothing was configured
//! - Expose call-anywhere emission functions per severity
//!
//! # Design Decisions
//! - The logger lives in an `ArcSwapOption`; reconfiguration swaps the whole
//!   instance, and in-flight emissions finish on whichever one they loaded
//! - One `AtomicLevel` outlives every logger the facade builds, so
//!   `set_level` never rebuilds anything
//! - Lazy initialization uses compare-and-swap so a configured logger is
//!   never replaced by a racing default

use std::panic::Location;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use once_cell::sync::Lazy;

use crate::config::LogConfig;
use crate::error::Error;
use crate::logger::field::Field;
use crate::logger::level::{lookup_level, AtomicLevel, Severity};
use crate::logger::Logger;

static LEVEL: Lazy<AtomicLevel> = Lazy::new(AtomicLevel::default);
static LOGGER: ArcSwapOption<Logger> = ArcSwapOption::const_empty();

/// Apply `config`, replacing the process-wide logger.
///
/// The threshold is updated even when building fails. On failure the current
/// logger is dropped and the next emission builds the default one.
#[track_caller]
pub fn configure(config: &LogConfig) -> Result<(), Error> {
    let recognized = apply_level(&config.level);

    match Logger::with_level(config, LEVEL.clone()) {
        Ok(logger) => {
            let logger = Arc::new(logger);
            LOGGER.store(Some(logger.clone()));
            if !recognized {
                warn_fallback(&logger, &config.level, Location::caller());
            }
            Ok(())
        }
        Err(e) => {
            LOGGER.store(None);
            Err(e)
        }
    }
}

/// Apply `config` only if its logger builds.
///
/// Unlike [`configure`], a failure leaves both the current logger and the
/// threshold untouched.
#[track_caller]
pub fn try_configure(config: &LogConfig) -> Result<(), Error> {
    let logger = Arc::new(Logger::with_level(config, LEVEL.clone())?);
    let recognized = apply_level(&config.level);
    LOGGER.store(Some(logger.clone()));
    if !recognized {
        warn_fallback(&logger, &config.level, Location::caller());
    }
    Ok(())
}

/// Change the threshold for every subsequent emission.
#[track_caller]
pub fn set_level(level: &str) {
    if !apply_level(level) {
        if let Some(logger) = current() {
            warn_fallback(&logger, level, Location::caller());
        }
    }
}

/// Lowercase name of the current threshold.
pub fn current_level() -> &'static str {
    LEVEL.get().as_str()
}

/// The process-wide logger, built with defaults if needed.
///
/// Returns `None` only if even the default logger cannot be built.
pub fn logger() -> Option<Arc<Logger>> {
    current()
}

fn apply_level(input: &str) -> bool {
    match lookup_level(input) {
        Some(severity) => {
            LEVEL.set(severity);
            true
        }
        None => {
            LEVEL.set(Severity::Debug);
            false
        }
    }
}

fn warn_fallback(logger: &Logger, input: &str, caller: &Location<'_>) {
    logger.log(
        Severity::Warn,
        "unrecognized log level, falling back to debug",
        &[Field::string("input", input)],
        caller,
    );
}

fn current() -> Option<Arc<Logger>> {
    if let Some(logger) = LOGGER.load_full() {
        return Some(logger);
    }

    let fresh = Arc::new(Logger::with_level(&LogConfig::default(), LEVEL.clone()).ok()?);
    let empty: Option<Arc<Logger>> = None;
    let previous = LOGGER.compare_and_swap(&empty, Some(fresh.clone()));
    match &*previous {
        Some(installed) => Some(installed.clone()),
        None => Some(fresh),
    }
}

#[track_caller]
fn emit(severity: Severity, message: &str, fields: &[Field]) {
    if let Some(logger) = current() {
        logger.log(severity, message, fields, Location::caller());
    }
}

#[track_caller]
pub fn debug(message: &str, fields: &[Field]) {
    emit(Severity::Debug, message, fields);
}

#[track_caller]
pub fn info(message: &str, fields: &[Field]) {
    emit(Severity::Info, message, fields);
}

#[track_caller]
pub fn warn(message: &str, fields: &[Field]) {
    emit(Severity::Warn, message, fields);
}

#[track_caller]
pub fn error(message: &str, fields: &[Field]) {
    emit(Severity::Error, message, fields);
}

/// Log at DPANIC. Never panics.
#[track_caller]
pub fn dpanic(message: &str, fields: &[Field]) {
    emit(Severity::DPanic, message, fields);
}

/// Log at PANIC, then panic with `message`.
#[track_caller]
pub fn panic(message: &str, fields: &[Field]) -> ! {
    emit(Severity::Panic, message, fields);
    panic!("{message}");
}
