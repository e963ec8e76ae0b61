//! Column and primary-key value types with custom serialization.
//!
//! Values are tagged unions where exactly one variant is present. The JSON
//! representation uses single-key objects like `{"STRING": "hello"}`; binary
//! payloads are base64-encoded.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An attribute column value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// UTF-8 string value.
    String(String),
    /// 64-bit signed integer value.
    Integer(i64),
    /// 64-bit float value.
    Double(f64),
    /// Boolean value.
    Boolean(bool),
    /// Opaque binary value.
    Binary(bytes::Bytes),
}

impl ColumnValue {
    /// Returns the string value if this is a `String` variant.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Integer` variant.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Boolean` variant.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the wire type descriptor (e.g. `"STRING"`, `"INTEGER"`).
    #[must_use]
    pub fn type_descriptor(&self) -> &'static str {
        match self {
            Self::String(_) => "STRING",
            Self::Integer(_) => "INTEGER",
            Self::Double(_) => "DOUBLE",
            Self::Boolean(_) => "BOOLEAN",
            Self::Binary(_) => "BINARY",
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Double(d) => write!(f, "{d:?}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Binary(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<bytes::Bytes> for ColumnValue {
    fn from(value: bytes::Bytes) -> Self {
        Self::Binary(value)
    }
}

impl Serialize for ColumnValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::String(s) => map.serialize_entry("STRING", s)?,
            Self::Integer(n) => map.serialize_entry("INTEGER", n)?,
            Self::Double(d) => map.serialize_entry("DOUBLE", d)?,
            Self::Boolean(b) => map.serialize_entry("BOOLEAN", b)?,
            Self::Binary(b) => map.serialize_entry("BINARY", &encode_binary(b))?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ColumnValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ColumnValueVisitor)
    }
}

struct ColumnValueVisitor;

impl<'de> Visitor<'de> for ColumnValueVisitor {
    type Value = ColumnValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a column value object with exactly one type key")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Err(de::Error::custom("column value must have exactly one key"));
        };

        let value = match key.as_str() {
            "STRING" => ColumnValue::String(map.next_value()?),
            "INTEGER" => ColumnValue::Integer(map.next_value()?),
            "DOUBLE" => ColumnValue::Double(map.next_value()?),
            "BOOLEAN" => ColumnValue::Boolean(map.next_value()?),
            "BINARY" => {
                let encoded: String = map.next_value()?;
                ColumnValue::Binary(decode_binary(&encoded).map_err(de::Error::custom)?)
            }
            other => {
                return Err(de::Error::unknown_field(
                    other,
                    &["STRING", "INTEGER", "DOUBLE", "BOOLEAN", "BINARY"],
                ));
            }
        };

        Ok(value)
    }
}

/// A primary-key column value.
///
/// Besides concrete values, three sentinels exist: `InfMin` / `InfMax` bound
/// range scans and `AutoIncrement` asks the server to allocate the value on put.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimaryKeyValue {
    /// String key value.
    String(String),
    /// Integer key value.
    Integer(i64),
    /// Binary key value.
    Binary(bytes::Bytes),
    /// Smaller than every other key value.
    InfMin,
    /// Larger than every other key value.
    InfMax,
    /// Server-allocated auto-increment value.
    AutoIncrement,
}

impl PrimaryKeyValue {
    /// Returns `true` for the range and auto-increment sentinels.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::InfMin | Self::InfMax | Self::AutoIncrement)
    }
}

impl fmt::Display for PrimaryKeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Binary(b) => write!(f, "<{} bytes>", b.len()),
            Self::InfMin => f.write_str("INF_MIN"),
            Self::InfMax => f.write_str("INF_MAX"),
            Self::AutoIncrement => f.write_str("AUTO_INCREMENT"),
        }
    }
}

impl From<&str> for PrimaryKeyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for PrimaryKeyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for PrimaryKeyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for PrimaryKeyValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl Serialize for PrimaryKeyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::String(s) => map.serialize_entry("STRING", s)?,
            Self::Integer(n) => map.serialize_entry("INTEGER", n)?,
            Self::Binary(b) => map.serialize_entry("BINARY", &encode_binary(b))?,
            Self::InfMin => map.serialize_entry("INF_MIN", &true)?,
            Self::InfMax => map.serialize_entry("INF_MAX", &true)?,
            Self::AutoIncrement => map.serialize_entry("AUTO_INCREMENT", &true)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PrimaryKeyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PrimaryKeyValueVisitor)
    }
}

struct PrimaryKeyValueVisitor;

impl<'de> Visitor<'de> for PrimaryKeyValueVisitor {
    type Value = PrimaryKeyValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a primary key value object with exactly one type key")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Err(de::Error::custom("primary key value must have exactly one key"));
        };

        let value = match key.as_str() {
            "STRING" => PrimaryKeyValue::String(map.next_value()?),
            "INTEGER" => PrimaryKeyValue::Integer(map.next_value()?),
            "BINARY" => {
                let encoded: String = map.next_value()?;
                PrimaryKeyValue::Binary(decode_binary(&encoded).map_err(de::Error::custom)?)
            }
            "INF_MIN" => {
                map.next_value::<de::IgnoredAny>()?;
                PrimaryKeyValue::InfMin
            }
            "INF_MAX" => {
                map.next_value::<de::IgnoredAny>()?;
                PrimaryKeyValue::InfMax
            }
            "AUTO_INCREMENT" => {
                map.next_value::<de::IgnoredAny>()?;
                PrimaryKeyValue::AutoIncrement
            }
            other => {
                return Err(de::Error::unknown_field(
                    other,
                    &[
                        "STRING",
                        "INTEGER",
                        "BINARY",
                        "INF_MIN",
                        "INF_MAX",
                        "AUTO_INCREMENT",
                    ],
                ));
            }
        };

        Ok(value)
    }
}

/// One named column of a primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrimaryKeyColumn {
    /// Primary-key column name.
    pub name: String,
    /// Primary-key column value.
    pub value: PrimaryKeyValue,
}

impl PrimaryKeyColumn {
    /// Create a primary-key column.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<PrimaryKeyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An ordered primary key. Column order follows the table's key schema.
pub type PrimaryKey = Vec<PrimaryKeyColumn>;

/// An attribute column, optionally pinned to a version timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Column value.
    pub value: ColumnValue,
    /// Cell version in milliseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Column {
    /// Create an unversioned column.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            timestamp: None,
        }
    }

    /// Pin the column to a version timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A row as returned by reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Row {
    /// The row's primary key.
    pub primary_key: PrimaryKey,
    /// Attribute columns, possibly several versions per name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Column>,
}

impl Row {
    /// Latest value of the named attribute, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&ColumnValue> {
        self.attributes
            .iter()
            .filter(|c| c.name == name)
            .max_by_key(|c| c.timestamp.unwrap_or(i64::MIN))
            .map(|c| &c.value)
    }
}

fn encode_binary(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

fn decode_binary(encoded: &str) -> Result<bytes::Bytes, base64::DecodeError> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map(bytes::Bytes::from)
}
