//! Caller-supplied request options.
//!
//! Options are an ordered list of `(key, value)` pairs. Keys name fields of a
//! request record; values are loosely shaped so that one option list can be
//! merged onto any record type. `OptionValue::Absent` marks an option that was
//! mentioned but carries no value; it never overwrites a record field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter::{Condition, FilterNode};
use crate::value::{ColumnValue, PrimaryKey};

/// One operand of an update operation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnOperand {
    /// Column name.
    pub name: String,
    /// Operand value; absent for deletes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ColumnValue>,
    /// Version the operand targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ColumnOperand {
    /// A named operand with a value (`put`, `increment`).
    #[must_use]
    pub fn value(name: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            timestamp: None,
        }
    }

    /// A bare column name (`delete_all`).
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            timestamp: None,
        }
    }

    /// Target a specific version.
    #[must_use]
    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// The value side of a request option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Mentioned without a value; skipped by the option mapper.
    Absent,
    /// Boolean flag.
    Bool(bool),
    /// Integer.
    Integer(i64),
    /// Float.
    Double(f64),
    /// Free-form string.
    String(String),
    /// Enumerated symbol such as `pk` or `backward`.
    Symbol(String),
    /// Column name list.
    Columns(Vec<String>),
    /// Integer pair, e.g. a `(start, end)` time range.
    Pair(i64, i64),
    /// Heterogeneous list.
    List(Vec<OptionValue>),
    /// Nested keyword options, e.g. a stream spec.
    Map(BTreeMap<String, OptionValue>),
    /// Update operand list.
    Operands(Vec<ColumnOperand>),
    /// Primary key.
    PrimaryKey(PrimaryKey),
    /// Compiled write condition.
    Condition(Condition),
    /// Compiled filter tree.
    Filter(FilterNode),
    /// Opaque binary payload.
    Bytes(bytes::Bytes),
    /// Opaque JSON payload (search queries).
    Json(serde_json::Value),
}

impl OptionValue {
    /// Build a symbol value.
    #[must_use]
    pub fn symbol(symbol: impl Into<String>) -> Self {
        Self::Symbol(symbol.into())
    }

    /// Build a keyword map from `(key, value)` pairs.
    #[must_use]
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, OptionValue)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns `true` for the `Absent` sentinel.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Name of the value's shape, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Columns(_) => "columns",
            Self::Pair(..) => "pair",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Operands(_) => "operands",
            Self::PrimaryKey(_) => "primary_key",
            Self::Condition(_) => "condition",
            Self::Filter(_) => "filter",
            Self::Bytes(_) => "bytes",
            Self::Json(_) => "json",
        }
    }

    /// The text of a `Symbol` or `String` value.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(s) | Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<(i64, i64)> for OptionValue {
    fn from((start, end): (i64, i64)) -> Self {
        Self::Pair(start, end)
    }
}

impl From<Vec<ColumnOperand>> for OptionValue {
    fn from(value: Vec<ColumnOperand>) -> Self {
        Self::Operands(value)
    }
}

impl From<Condition> for OptionValue {
    fn from(value: Condition) -> Self {
        Self::Condition(value)
    }
}

impl From<FilterNode> for OptionValue {
    fn from(value: FilterNode) -> Self {
        Self::Filter(value)
    }
}

impl From<serde_json::Value> for OptionValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// An ordered list of request options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    entries: Vec<(String, OptionValue)>,
}

impl RequestOptions {
    /// An empty option list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an option.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Append a column name list option.
    #[must_use]
    pub fn columns<S: Into<String>>(
        self,
        key: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        let columns = columns.into_iter().map(Into::into).collect();
        self.set(key, OptionValue::Columns(columns))
    }

    /// Append a symbol option.
    #[must_use]
    pub fn symbol(self, key: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.set(key, OptionValue::Symbol(symbol.into()))
    }

    /// Append an option in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// The last value supplied for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterate the options in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, OptionValue)> for RequestOptions {
    fn from_iter<I: IntoIterator<Item = (K, OptionValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
