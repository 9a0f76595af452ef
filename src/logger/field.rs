//! Structured key/value fields attached to a record.

use std::fmt;
use std::time::Duration;

use serde::ser::{Serialize, SerializeTuple, Serializer};

/// A typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// Encoded as integer nanoseconds.
    Duration(Duration),
    Json(serde_json::Value),
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Uint(n) => serializer.serialize_u64(*n),
            Value::Float(x) if x.is_nan() => serializer.serialize_str("NaN"),
            Value::Float(x) if x.is_infinite() => {
                serializer.serialize_str(if *x > 0.0 { "+Inf" } else { "-Inf" })
            }
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Duration(d) => {
                serializer.serialize_i64(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
            }
            Value::Json(v) => v.serialize(serializer),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Uint(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Uint(u64::try_from(n).unwrap_or(u64::MAX))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

/// A key/value pair. Fields keep the order they were passed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    /// An `error` field holding the error's display text.
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self::string("error", err.to_string())
    }

    pub fn json(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self::new(key, Value::Json(value))
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&self.key)?;
        pair.serialize_element(&self.value)?;
        pair.end()
    }
}

/// Fields carried through a `tracing` event as one recorded value.
///
/// Renders as a JSON array of `[key, value]` pairs, which the record encoder
/// decodes back in order.
pub(crate) struct EncodedFields<'a>(pub &'a [Field]);

impl fmt::Display for EncodedFields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self.0) {
            Ok(encoded) => f.write_str(&encoded),
            Err(_) => f.write_str("[]"),
        }
    }
}
