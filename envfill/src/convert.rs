//! # Typed Conversion
//!
//! Converts decoded nodes into the exact types configuration records
//! declare. Scalar kinds go through placeholder resolution first, then a
//! string parse; container kinds recurse element-wise; opaque kinds are
//! re-encoded verbatim.
//!
//! Conversion rules per declared kind:
//! - integers / floats: base-10 parse of the resolved string, empty → zero
//! - booleans: `1/t/T/TRUE/true/True` and `0/f/F/FALSE/false/False`,
//!   empty → false
//! - strings: resolved string verbatim
//! - durations: duration literals (`15s`, `300ms`, `1h30m`, `1.5s`),
//!   empty → zero
//! - timestamps: flexible multi-format parse, strict RFC-3339 fallback,
//!   empty → Unix epoch
//! - [`RawValue`]: canonical JSON re-encoding, no placeholder resolution
//! - `Vec<T>` / string-keyed maps / `Option<T>`: recursive
//! - [`serde_json::Value`]: decoded value carried verbatim

use crate::env::EnvLookup;
use crate::error::Error;
use crate::resolve::{node_kind, resolve_node};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// A decoded mapping node: the tree shape every document format is
/// decoded into before reaching the populator.
pub type Mapping = serde_json::Map<String, Value>;

/// Conversion from a decoded node into a declared field type.
///
/// Implemented for all scalar, temporal, container, and dynamic kinds a
/// configuration record can declare. Record types get their impl from
/// [`config_record!`](crate::config_record). A declared kind without a
/// `FromNode` impl is rejected at compile time.
pub trait FromNode: Sized {
    fn from_node(node: &Value, env: &dyn EnvLookup) -> Result<Self, Error>;
}

macro_rules! impl_from_node_int {
    ($($ty:ty),+ $(,)?) => {$(
        impl FromNode for $ty {
            fn from_node(node: &Value, env: &dyn EnvLookup) -> Result<Self, Error> {
                let resolved = resolve_node(node, env)?;
                if resolved.is_empty() {
                    return Ok(0);
                }
                resolved
                    .parse::<$ty>()
                    .map_err(|e| Error::conversion(stringify!($ty), resolved, e.to_string()))
            }
        }
    )+};
}

impl_from_node_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_from_node_float {
    ($($ty:ty),+ $(,)?) => {$(
        impl FromNode for $ty {
            fn from_node(node: &Value, env: &dyn EnvLookup) -> Result<Self, Error> {
                let resolved = resolve_node(node, env)?;
                if resolved.is_empty() {
                    return Ok(0.0);
                }
                resolved
                    .parse::<$ty>()
                    .map_err(|e| Error::conversion(stringify!($ty), resolved, e.to_string()))
            }
        }
    )+};
}

impl_from_node_float!(f32, f64);

impl FromNode for bool {
    fn from_node(node: &Value, env: &dyn EnvLookup) -> Result<Self, Error> {
        let resolved = resolve_node(node, env)?;
        if resolved.is_empty() {
            return Ok(false);
        }
        parse_bool(&resolved).ok_or_else(|| {
            Error::conversion("bool", resolved, "expected a boolean literal")
        })
    }
}

impl FromNode for String {
    fn from_node(node: &Value, env: &dyn EnvLookup) -> Result<Self, Error> {
        resolve_node(node, env)
    }
}

impl FromNode for Duration {
    fn from_node(node: &Value, env: &dyn EnvLookup) -> Result<Self, Error> {
        let resolved = resolve_node(node, env)?;
        if resolved.is_empty() {
            return Ok(Duration::ZERO);
        }
        parse_duration(&resolved).map_err(|reason| Error::conversion("duration", resolved, reason))
    }
}

impl FromNode for DateTime<Utc> {
    fn from_node(node: &Value, env: &dyn EnvLookup) -> Result<Self, Error> {
        let resolved = resolve_node(node, env)?;
        if resolved.is_empty() {
            return Ok(DateTime::<Utc>::UNIX_EPOCH);
        }
        parse_timestamp(&resolved).map_err(|reason| Error::conversion("timestamp", resolved, reason))
    }
}

impl<T: FromNode> FromNode for Vec<T> {
    fn from_node(node: &Value, env: &dyn EnvLookup) -> Result<Self, Error> {
        let items = node
            .as_array()
            .ok_or_else(|| Error::shape_mismatch("sequence", node_kind(node)))?;
        items.iter().map(|item| T::from_node(item, env)).collect()
    }
}

impl<V: FromNode> FromNode for HashMap<String, V> {
    fn from_node(node: &Value, env: &dyn EnvLookup) -> Result<Self, Error> {
        let entries = node
            .as_object()
            .ok_or_else(|| Error::shape_mismatch("mapping", node_kind(node)))?;
        entries
            .iter()
            .map(|(key, value)| Ok((key.clone(), V::from_node(value, env)?)))
            .collect()
    }
}

impl<V: FromNode> FromNode for BTreeMap<String, V> {
    fn from_node(node: &Value, env: &dyn EnvLookup) -> Result<Self, Error> {
        let entries = node
            .as_object()
            .ok_or_else(|| Error::shape_mismatch("mapping", node_kind(node)))?;
        entries
            .iter()
            .map(|(key, value)| Ok((key.clone(), V::from_node(value, env)?)))
            .collect()
    }
}

impl<T: FromNode> FromNode for Option<T> {
    fn from_node(node: &Value, env: &dyn EnvLookup) -> Result<Self, Error> {
        T::from_node(node, env).map(Some)
    }
}

impl FromNode for Value {
    fn from_node(node: &Value, _env: &dyn EnvLookup) -> Result<Self, Error> {
        Ok(node.clone())
    }
}

/// Opaque value kept as canonical JSON bytes.
///
/// Fields of this type receive the raw node re-encoded as JSON text,
/// bypassing placeholder resolution entirely. A null node yields an
/// empty blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawValue(Vec<u8>);

impl RawValue {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(bytes: Vec<u8>) -> Self {
        RawValue(bytes)
    }
}

impl FromNode for RawValue {
    fn from_node(node: &Value, _env: &dyn EnvLookup) -> Result<Self, Error> {
        if node.is_null() {
            return Ok(RawValue::default());
        }
        let bytes = serde_json::to_vec(node)
            .map_err(|e| Error::conversion("raw value", node.to_string(), e.to_string()))?;
        Ok(RawValue(bytes))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

// Unit suffixes with their length in nanoseconds, ordered so
// multi-character units match before their single-character prefixes
// ("ms" before "m" and "s").
const DURATION_UNITS: &[(&str, u64)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 3_600 * 1_000_000_000),
];

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a duration literal: one or more `<magnitude><unit>` components,
/// where the magnitude is a non-negative integer or decimal and the unit
/// is one of `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`.
///
/// Integer magnitudes take an exact integer-nanosecond path; float math
/// is used only for decimal magnitudes.
fn parse_duration(value: &str) -> Result<Duration, String> {
    if value.is_empty() {
        return Err("empty duration".to_string());
    }
    let mut rest = value;
    let mut total = Duration::ZERO;
    while !rest.is_empty() {
        let magnitude_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .ok_or_else(|| format!("missing unit suffix in '{value}'"))?;
        if magnitude_end == 0 {
            return Err(format!("invalid duration '{value}'"));
        }
        let (magnitude_text, tail) = rest.split_at(magnitude_end);

        let (suffix, unit_nanos) = DURATION_UNITS
            .iter()
            .find(|(suffix, _)| tail.starts_with(suffix))
            .ok_or_else(|| format!("unknown unit in '{value}'"))?;

        let component = if magnitude_text.contains('.') {
            let magnitude: f64 = magnitude_text
                .parse()
                .map_err(|_| format!("invalid magnitude '{magnitude_text}' in '{value}'"))?;
            Duration::try_from_secs_f64(magnitude * (*unit_nanos as f64) / NANOS_PER_SEC as f64)
                .map_err(|_| format!("duration '{value}' out of range"))?
        } else {
            let magnitude: u128 = magnitude_text
                .parse()
                .map_err(|_| format!("invalid magnitude '{magnitude_text}' in '{value}'"))?;
            let nanos = magnitude
                .checked_mul(u128::from(*unit_nanos))
                .ok_or_else(|| format!("duration '{value}' out of range"))?;
            let secs = u64::try_from(nanos / NANOS_PER_SEC)
                .map_err(|_| format!("duration '{value}' out of range"))?;
            Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
        };
        total = total
            .checked_add(component)
            .ok_or_else(|| format!("duration '{value}' out of range"))?;
        rest = &tail[suffix.len()..];
    }
    Ok(total)
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %b %Y"];

/// Parse a timestamp: a list of common date/time layouts first
/// (interpreted as UTC), strict RFC-3339 as the fallback.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&dt));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
        }
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}
