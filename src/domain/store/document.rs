//! Field values and documents as the store understands them.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

lazy_static! {
    /// Path segments are opaque ids; slashes are the only structural character.
    static ref PATH_SEGMENT_REGEX: regex::Regex = regex::Regex::new(r"^[^/\s]+$").unwrap();
}

/// A single stored field.
///
/// `ServerTimestamp` is a write-time sentinel: the store replaces it with its
/// own clock when the write is applied, so clients never stamp records with
/// local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Timestamp(DateTime<Utc>),
    ServerTimestamp,
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

/// An unordered set of named fields, as read from or written to the store.
pub type Document = BTreeMap<String, FieldValue>;

/// Join path segments into a document path, e.g. `posts/{id}/likes/{uid}`.
pub fn join_path(segments: &[&str]) -> String {
    segments.join("/")
}

/// Whether `segment` is usable as a single path component.
pub fn is_valid_segment(segment: &str) -> bool {
    PATH_SEGMENT_REGEX.is_match(segment)
}

/// JSON rendering of a document, for logs and client-side inspection.
/// The server-timestamp sentinel renders as `null` since it has no value yet.
pub fn to_json(fields: &Document) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = fields
        .iter()
        .map(|(key, value)| {
            let json = match value {
                FieldValue::Null | FieldValue::ServerTimestamp => serde_json::Value::Null,
                FieldValue::Bool(b) => serde_json::Value::Bool(*b),
                FieldValue::Int(n) => serde_json::Value::from(*n),
                FieldValue::Str(s) => serde_json::Value::from(s.as_str()),
                FieldValue::Timestamp(t) => serde_json::Value::from(t.to_rfc3339()),
            };
            (key.clone(), json)
        })
        .collect();
    serde_json::Value::Object(map)
}
