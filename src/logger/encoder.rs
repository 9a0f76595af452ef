//! JSON record encoding.
//!
//! Every record is one JSON object on its own line with the keys `level`,
//! `time`, `caller`, `message` in that order, followed by the structured
//! fields in call order.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use tracing::field::{Field as EventField, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::logger::level::Severity;

pub const MESSAGE_KEY: &str = "message";
pub const LEVEL_KEY: &str = "level";
pub const TIME_KEY: &str = "time";
pub const CALLER_KEY: &str = "caller";

/// Event field that carries facade fields as encoded pairs.
pub(crate) const FIELDS_FIELD: &str = "fields";

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// ISO-8601 local time with milliseconds and numeric offset.
pub(crate) fn timer() -> ChronoLocal {
    ChronoLocal::new(TIME_FORMAT.to_string())
}

fn is_reserved(key: &str) -> bool {
    matches!(key, MESSAGE_KEY | LEVEL_KEY | TIME_KEY | CALLER_KEY)
}

/// Trim a source path to its last directory and file name.
pub fn short_caller(file: &str, line: u32) -> String {
    let mut cut = file.len();
    for _ in 0..2 {
        match file[..cut].rfind(['/', '\\']) {
            Some(idx) => cut = idx,
            None => return format!("{file}:{line}"),
        }
    }
    format!("{}:{line}", &file[cut + 1..])
}

/// Formats events as fixed-layout JSON lines.
pub struct RecordFormat {
    timer: ChronoLocal,
}

impl RecordFormat {
    pub fn new() -> Self {
        Self { timer: timer() }
    }
}

impl Default for RecordFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, N> FormatEvent<S, N> for RecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let mut time = String::new();
        self.timer.format_time(&mut Writer::new(&mut time))?;

        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let caller = visitor.caller.take().or_else(|| {
            metadata
                .file()
                .map(|file| short_caller(file, metadata.line().unwrap_or(0)))
        });

        let record = Record {
            level: Severity::of(metadata).capital(),
            time,
            caller,
            message: visitor.message,
            fields: visitor.fields,
        };

        let mut line = Vec::with_capacity(256);
        record
            .write(&mut serde_json::Serializer::new(&mut line))
            .map_err(|_| fmt::Error)?;
        let line = String::from_utf8(line).map_err(|_| fmt::Error)?;
        writeln!(writer, "{line}")
    }
}

struct Record {
    level: &'static str,
    time: String,
    caller: Option<String>,
    message: String,
    fields: Vec<(String, serde_json::Value)>,
}

impl Record {
    fn write<W: std::io::Write>(
        &self,
        ser: &mut serde_json::Serializer<W>,
    ) -> Result<(), serde_json::Error> {
        let mut map = ser.serialize_map(None)?;
        map.serialize_entry(LEVEL_KEY, self.level)?;
        map.serialize_entry(TIME_KEY, &self.time)?;
        if let Some(caller) = &self.caller {
            map.serialize_entry(CALLER_KEY, caller)?;
        }
        map.serialize_entry(MESSAGE_KEY, &self.message)?;
        for (key, value) in &self.fields {
            if !is_reserved(key) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// Collects the message, caller, and fields of one event.
#[derive(Default)]
struct RecordVisitor {
    message: String,
    caller: Option<String>,
    fields: Vec<(String, serde_json::Value)>,
}

impl RecordVisitor {
    fn push(&mut self, field: &EventField, value: serde_json::Value) {
        let name = field.name();
        // Bridged `log` records carry their metadata as `log.*` fields.
        if !name.starts_with("log.") {
            self.fields.push((name.to_string(), value));
        }
    }

    fn record_text(&mut self, field: &EventField, text: String) {
        match field.name() {
            MESSAGE_KEY => self.message = text,
            CALLER_KEY => self.caller = Some(text),
            FIELDS_FIELD => {
                match serde_json::from_str::<Vec<(String, serde_json::Value)>>(&text) {
                    Ok(pairs) => self.fields.extend(pairs),
                    Err(_) => self.push(field, serde_json::Value::String(text)),
                }
            }
            _ => self.push(field, serde_json::Value::String(text)),
        }
    }
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &EventField, value: &str) {
        self.record_text(field, value.to_string());
    }

    fn record_debug(&mut self, field: &EventField, value: &dyn fmt::Debug) {
        self.record_text(field, format!("{value:?}"));
    }

    fn record_i64(&mut self, field: &EventField, value: i64) {
        self.push(field, value.into());
    }

    fn record_u64(&mut self, field: &EventField, value: u64) {
        self.push(field, value.into());
    }

    fn record_f64(&mut self, field: &EventField, value: f64) {
        let value = serde_json::to_value(crate::logger::field::Value::Float(value))
            .unwrap_or(serde_json::Value::Null);
        self.push(field, value);
    }

    fn record_bool(&mut self, field: &EventField, value: bool) {
        self.push(field, value.into());
    }

    fn record_error(&mut self, field: &EventField, value: &(dyn std::error::Error + 'static)) {
        self.record_text(field, value.to_string());
    }
}
