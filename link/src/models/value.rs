use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;
use std::time::SystemTime;

/// A single value sent to or received from CrateDB.
///
/// Column values handed to [`insert`](crate::CrateLinkClient::insert) and
/// [`update`](crate::CrateLinkClient::update) are converted into this type,
/// and every cell of a typed result row is one of these.
///
/// # Examples
///
/// ```rust
/// use cratedb_link::CrateValue;
/// use chrono::{TimeZone, Utc};
/// use serde_json::json;
///
/// let ts = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
/// assert_eq!(CrateValue::from(ts).to_argument(), json!(1_700_000_000_000i64));
/// assert_eq!(CrateValue::from("Ada").to_argument(), json!("Ada"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CrateValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Point in time, exchanged on the wire as epoch milliseconds
    Timestamp(DateTime<Utc>),
    /// Objects, arrays and geo points are passed through untouched
    Json(JsonValue),
}

impl CrateValue {
    /// Decode a cell of a timestamp column. Non-numeric cells are kept as-is.
    pub fn from_timestamp_cell(cell: JsonValue) -> Self {
        match cell.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis) {
            Some(ts) => CrateValue::Timestamp(ts),
            None => match cell.as_f64().and_then(|ms| DateTime::<Utc>::from_timestamp_millis(ms as i64)) {
                Some(ts) => CrateValue::Timestamp(ts),
                None => CrateValue::from(cell),
            },
        }
    }

    /// Value as a positional statement argument.
    ///
    /// Timestamps become their epoch-millisecond integer; every other value
    /// is sent as it is.
    pub fn to_argument(&self) -> JsonValue {
        match self {
            CrateValue::Null => JsonValue::Null,
            CrateValue::Bool(b) => JsonValue::Bool(*b),
            CrateValue::Integer(i) => JsonValue::from(*i),
            CrateValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            CrateValue::Text(s) => JsonValue::String(s.clone()),
            CrateValue::Timestamp(ts) => JsonValue::from(ts.timestamp_millis()),
            CrateValue::Json(v) => v.clone(),
        }
    }

    /// Value rendered as the body of a single-quoted SQL literal.
    ///
    /// No escaping is applied.
    pub fn to_literal(&self) -> String {
        match self {
            CrateValue::Null => "null".to_string(),
            CrateValue::Bool(b) => b.to_string(),
            CrateValue::Integer(i) => i.to_string(),
            CrateValue::Float(f) => f.to_string(),
            CrateValue::Text(s) => s.clone(),
            CrateValue::Timestamp(ts) => ts.timestamp_millis().to_string(),
            CrateValue::Json(JsonValue::String(s)) => s.clone(),
            CrateValue::Json(v) => v.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CrateValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CrateValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CrateValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CrateValue::Float(f) => Some(*f),
            CrateValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CrateValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            CrateValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            CrateValue::Json(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for CrateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrateValue::Null => f.write_str("NULL"),
            CrateValue::Timestamp(ts) => {
                f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            other => f.write_str(&other.to_literal()),
        }
    }
}

impl Serialize for CrateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CrateValue::Timestamp(ts) => {
                serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            other => other.to_argument().serialize(serializer),
        }
    }
}

impl From<JsonValue> for CrateValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => CrateValue::Null,
            JsonValue::Bool(b) => CrateValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => CrateValue::Integer(i),
                None => match n.as_f64() {
                    Some(f) => CrateValue::Float(f),
                    None => CrateValue::Json(JsonValue::Number(n)),
                },
            },
            JsonValue::String(s) => CrateValue::Text(s),
            other => CrateValue::Json(other),
        }
    }
}

impl From<bool> for CrateValue {
    fn from(b: bool) -> Self {
        CrateValue::Bool(b)
    }
}

impl From<i32> for CrateValue {
    fn from(i: i32) -> Self {
        CrateValue::Integer(i64::from(i))
    }
}

impl From<i64> for CrateValue {
    fn from(i: i64) -> Self {
        CrateValue::Integer(i)
    }
}

impl From<u32> for CrateValue {
    fn from(i: u32) -> Self {
        CrateValue::Integer(i64::from(i))
    }
}

impl From<f64> for CrateValue {
    fn from(f: f64) -> Self {
        CrateValue::Float(f)
    }
}

impl From<&str> for CrateValue {
    fn from(s: &str) -> Self {
        CrateValue::Text(s.to_string())
    }
}

impl From<String> for CrateValue {
    fn from(s: String) -> Self {
        CrateValue::Text(s)
    }
}

impl From<DateTime<Utc>> for CrateValue {
    fn from(ts: DateTime<Utc>) -> Self {
        CrateValue::Timestamp(ts)
    }
}

impl From<SystemTime> for CrateValue {
    fn from(t: SystemTime) -> Self {
        CrateValue::Timestamp(DateTime::<Utc>::from(t))
    }
}

impl<T: Into<CrateValue>> From<Option<T>> for CrateValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CrateValue::Null)
    }
}
