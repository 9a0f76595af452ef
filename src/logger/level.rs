//! Severities, the shared threshold, and level-string parsing.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tracing::{Level, Metadata};

/// Event targets used by the facade, one per severity.
///
/// `tracing` has no dpanic/panic levels, so the facade encodes its severity
/// in the target and maps it back when filtering and encoding.
pub(crate) const DEBUG_TARGET: &str = "logfacade::debug";
pub(crate) const INFO_TARGET: &str = "logfacade::info";
pub(crate) const WARN_TARGET: &str = "logfacade::warn";
pub(crate) const ERROR_TARGET: &str = "logfacade::error";
pub(crate) const DPANIC_TARGET: &str = "logfacade::dpanic";
pub(crate) const PANIC_TARGET: &str = "logfacade::panic";

/// Record severity, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    /// Logged like a panic but never unwinds.
    DPanic = 4,
    /// Logged, then the emitting call panics.
    Panic = 5,
}

impl Severity {
    /// Lowercase name, e.g. `"dpanic"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::DPanic => "dpanic",
            Severity::Panic => "panic",
        }
    }

    /// Capitalized name as written to the `level` key.
    pub fn capital(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::DPanic => "DPANIC",
            Severity::Panic => "PANIC",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Severity::Debug,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            4 => Severity::DPanic,
            _ => Severity::Panic,
        }
    }

    /// Severity of an event, honoring the facade's per-severity targets.
    pub(crate) fn of(metadata: &Metadata<'_>) -> Self {
        match metadata.target() {
            DEBUG_TARGET => Severity::Debug,
            INFO_TARGET => Severity::Info,
            WARN_TARGET => Severity::Warn,
            ERROR_TARGET => Severity::Error,
            DPANIC_TARGET => Severity::DPanic,
            PANIC_TARGET => Severity::Panic,
            _ => match *metadata.level() {
                Level::ERROR => Severity::Error,
                Level::WARN => Severity::Warn,
                Level::INFO => Severity::Info,
                _ => Severity::Debug,
            },
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A severity threshold shared by every clone.
///
/// Records below the threshold are dropped by the logger's filter. Updates are
/// visible to all loggers holding a clone on their next event.
#[derive(Debug, Clone)]
pub struct AtomicLevel {
    inner: Arc<AtomicU8>,
}

impl AtomicLevel {
    pub fn new(severity: Severity) -> Self {
        Self {
            inner: Arc::new(AtomicU8::new(severity as u8)),
        }
    }

    pub fn get(&self) -> Severity {
        Severity::from_u8(self.inner.load(Ordering::Relaxed))
    }

    pub fn set(&self, severity: Severity) {
        self.inner.store(severity as u8, Ordering::Relaxed);
    }

    /// Whether a record at `severity` passes the threshold.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.get()
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Severity::Debug)
    }
}

impl fmt::Display for AtomicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.get().fmt(f)
    }
}

/// Recognized threshold names. `None` means the input should fall back.
pub fn lookup_level(input: &str) -> Option<Severity> {
    match input.trim() {
        "" | "debug" => Some(Severity::Debug),
        "info" => Some(Severity::Info),
        _ => None,
    }
}

/// Parse a threshold name. Unrecognized input falls back to debug.
pub fn parse_level(input: &str) -> Severity {
    lookup_level(input).unwrap_or(Severity::Debug)
}
