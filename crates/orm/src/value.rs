//! In-memory field values and their Redis storage encodings.
//!
//! A [`Value`] is the generic currency the engine moves field data around
//! in: the index engine encodes one to a hash-field string or an
//! equality-index segment, the query engine decodes one back out of a
//! `HGETALL` response. The encodings below are normative per the storage
//! contract -- tests assert against them directly, not just round-trips.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::error::OrmError;

/// The value-type a [`crate::field::FieldMeta`] advertises. Distinct from
/// `Value` itself so a descriptor can declare its type before any instance
/// holds a value of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    Date,
}

impl ValueKind {
    /// Integer, float, datetime and date fields can back a range index;
    /// string and boolean cannot.
    pub fn is_range_indexable(self) -> bool {
        matches!(
            self,
            ValueKind::Integer | ValueKind::Float | ValueKind::DateTime | ValueKind::Date
        )
    }

    fn name(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::DateTime => "datetime",
            ValueKind::Date => "date",
        }
    }
}

/// A scalar field value held in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    /// No value set. Encodes as `"0"` for numeric kinds, matching the
    /// storage contract's `null -> "0"` rule; for non-numeric kinds this is
    /// simply "nothing to typecast" and should not reach storage in
    /// practice (descriptors default non-numeric fields to an empty value
    /// of their own kind rather than `Null`).
    Null,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Date(_) => ValueKind::Date,
            Value::Null => ValueKind::String,
        }
    }

    /// Typecast-for-storage: the string written into a Redis hash field or
    /// an equality-index segment (before base64 encoding).
    pub fn to_storage(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Boolean(b) => {
                if *b {
                    "True".to_string()
                } else {
                    "False".to_string()
                }
            }
            Value::DateTime(dt) => format!("{}.{}", dt.timestamp(), dt.timestamp_subsec_micros()),
            Value::Date(d) => midnight_utc(*d).timestamp().to_string(),
            Value::Null => "0".to_string(),
        }
    }

    /// Typecast-for-read: parse a stored string back into a typed value
    /// given the field's declared kind.
    pub fn from_storage(kind: ValueKind, raw: &str) -> Result<Value, OrmError> {
        match kind {
            ValueKind::String => Ok(Value::String(raw.to_string())),
            ValueKind::Integer => raw
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| type_error("integer", raw)),
            ValueKind::Float => raw
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| type_error("float", raw)),
            ValueKind::Boolean => match raw {
                "True" => Ok(Value::Boolean(true)),
                "False" => Ok(Value::Boolean(false)),
                _ => Err(type_error("boolean", raw)),
            },
            ValueKind::DateTime => {
                let (secs, micros) = raw.split_once('.').unwrap_or((raw, "0"));
                let secs: i64 = secs.parse().map_err(|_| type_error("datetime", raw))?;
                let micros: u32 = micros.parse().map_err(|_| type_error("datetime", raw))?;
                DateTime::from_timestamp(secs, micros * 1000)
                    .map(Value::DateTime)
                    .ok_or_else(|| type_error("datetime", raw))
            }
            ValueKind::Date => {
                let secs: i64 = raw.parse().map_err(|_| type_error("date", raw))?;
                Utc.timestamp_opt(secs, 0)
                    .single()
                    .map(|dt| Value::Date(dt.date_naive()))
                    .ok_or_else(|| type_error("date", raw))
            }
        }
    }

    /// The numeric score used as a `ZADD` score for range-indexed fields.
    /// `None` for non-range-indexable kinds.
    pub fn numeric_score(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::DateTime(dt) => {
                Some(dt.timestamp() as f64 + dt.timestamp_subsec_micros() as f64 / 1_000_000.0)
            }
            Value::Date(d) => Some(midnight_utc(*d).timestamp() as f64),
            Value::Boolean(_) | Value::String(_) | Value::Null => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
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
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

fn midnight_utc(d: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0).expect("midnight is always a valid time"))
}

fn type_error(expected: &str, found: &str) -> OrmError {
    OrmError::TypeError {
        field: String::new(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
