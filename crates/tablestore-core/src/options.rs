//! Request option mapper.
//!
//! Every request record declares an [`OptionSchema`]: a table of setter
//! functions keyed by option name. [`merge`] applies a caller's option list
//! onto a copy of a record through that table. Keys with no setter are
//! dropped and `Absent` values are skipped, so unknown or unset options never
//! fail a request. A handful of keys (`return_type`, `direction`,
//! `stream_spec`, `time_range`) normalise their value into a typed field and
//! fail with a named error on anything they do not recognise.

use serde::de::DeserializeOwned;
use tablestore_model::filter::{Condition, FilterNode};
use tablestore_model::options::{OptionValue, RequestOptions};
use tablestore_model::request::{
    BatchWriteRowRequest, CreateTableRequest, DeleteRowRequest, GetRangeRequest, GetRowRequest,
    MultiRowQueryCriteria, PutRowRequest, RowInBatchWriteRequest, SearchRequest,
    UpdateRowRequest, UpdateTableRequest,
};
use tablestore_model::types::{Direction, ReturnType, StreamSpec, TimeRange};
use tablestore_model::value::PrimaryKey;
use tracing::trace;

use crate::condition;
use crate::error::{TableStoreError, TableStoreResult};

/// Applies one option value to a record field.
pub type Setter<R> = fn(&mut R, &str, &OptionValue) -> TableStoreResult<()>;

/// Option names a record accepts and how each one is applied.
pub trait OptionSchema: Clone {
    /// Setter for `key`, or `None` if the record has no such field.
    fn setter(key: &str) -> Option<Setter<Self>>;

    /// Every option name the record accepts.
    fn option_keys() -> &'static [&'static str];
}

/// Merge `options` onto a copy of `record`.
///
/// Options apply in order, so a repeated key ends with its last value.
pub fn merge<R: OptionSchema>(record: &R, options: &RequestOptions) -> TableStoreResult<R> {
    let mut merged = record.clone();
    for (key, value) in options.iter() {
        if value.is_absent() {
            continue;
        }
        let Some(set) = R::setter(key) else {
            trace!(key, record = std::any::type_name::<R>(), "dropping unknown option");
            continue;
        };
        set(&mut merged, key, value)?;
    }
    Ok(merged)
}

macro_rules! option_schema {
    ($record:ty { $($key:literal => $setter:expr),* $(,)? }) => {
        impl OptionSchema for $record {
            fn setter(key: &str) -> Option<Setter<Self>> {
                let setter: Setter<Self> = match key {
                    $($key => $setter,)*
                    _ => return None,
                };
                Some(setter)
            }

            fn option_keys() -> &'static [&'static str] {
                &[$($key),*]
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Value shapes
// ---------------------------------------------------------------------------

fn text(key: &str, value: &OptionValue) -> TableStoreResult<String> {
    value
        .as_symbol()
        .map(str::to_owned)
        .ok_or_else(|| TableStoreError::invalid_option(key, value))
}

fn int(key: &str, value: &OptionValue) -> TableStoreResult<i64> {
    match value {
        OptionValue::Integer(n) => Ok(*n),
        _ => Err(TableStoreError::invalid_option(key, value)),
    }
}

fn flag(key: &str, value: &OptionValue) -> TableStoreResult<bool> {
    match value {
        OptionValue::Bool(b) => Ok(*b),
        _ => Err(TableStoreError::invalid_option(key, value)),
    }
}

/// Column names given as a name list, a list of strings, or one name.
pub(crate) fn columns(key: &str, value: &OptionValue) -> TableStoreResult<Vec<String>> {
    match value {
        OptionValue::Columns(names) => Ok(names.clone()),
        OptionValue::List(items) => items.iter().map(|item| text(key, item)).collect(),
        OptionValue::String(name) | OptionValue::Symbol(name) => Ok(vec![name.clone()]),
        _ => Err(TableStoreError::invalid_option(key, value)),
    }
}

fn filter(key: &str, value: &OptionValue) -> TableStoreResult<FilterNode> {
    match value {
        OptionValue::Filter(f) => Ok(f.clone()),
        _ => Err(TableStoreError::invalid_option(key, value)),
    }
}

/// A compiled condition, or a bare row-existence symbol.
fn write_condition(key: &str, value: &OptionValue) -> TableStoreResult<Condition> {
    match value {
        OptionValue::Condition(c) => Ok(c.clone()),
        OptionValue::Symbol(s) | OptionValue::String(s) => condition::build(s),
        _ => Err(TableStoreError::invalid_option(key, value)),
    }
}

fn primary_keys(key: &str, value: &OptionValue) -> TableStoreResult<Vec<PrimaryKey>> {
    match value {
        OptionValue::PrimaryKey(pk) => Ok(vec![pk.clone()]),
        OptionValue::List(items) => items
            .iter()
            .map(|item| match item {
                OptionValue::PrimaryKey(pk) => Ok(pk.clone()),
                other => Err(TableStoreError::invalid_option(key, other)),
            })
            .collect(),
        _ => Err(TableStoreError::invalid_option(key, value)),
    }
}

fn json(key: &str, value: &OptionValue) -> TableStoreResult<serde_json::Value> {
    match value {
        OptionValue::Json(v) => Ok(v.clone()),
        OptionValue::String(s) => {
            serde_json::from_str(s).map_err(|_| TableStoreError::invalid_option(key, value))
        }
        _ => Err(TableStoreError::invalid_option(key, value)),
    }
}

/// Typed schema records passed as JSON (`defined_columns`, `index_metas`).
fn schema_list<T: DeserializeOwned>(key: &str, value: &OptionValue) -> TableStoreResult<Vec<T>> {
    serde_json::from_value(json(key, value)?)
        .map_err(|_| TableStoreError::invalid_option(key, value))
}

// ---------------------------------------------------------------------------
// Field transforms
// ---------------------------------------------------------------------------

/// `none | pk | after_modify`.
pub fn return_type(value: &OptionValue) -> TableStoreResult<ReturnType> {
    value
        .as_symbol()
        .and_then(ReturnType::from_symbol)
        .ok_or_else(|| TableStoreError::InvalidReturnType(describe(value)))
}

/// `forward | backward`.
pub fn direction(value: &OptionValue) -> TableStoreResult<Direction> {
    value
        .as_symbol()
        .and_then(Direction::from_symbol)
        .ok_or_else(|| TableStoreError::InvalidDirection(describe(value)))
}

/// `{is_enabled: bool, expiration_time?: integer}`.
pub fn stream_spec(key: &str, value: &OptionValue) -> TableStoreResult<StreamSpec> {
    let invalid = || TableStoreError::invalid_option(key, value);
    let OptionValue::Map(fields) = value else {
        return Err(invalid());
    };
    if fields
        .keys()
        .any(|k| k != "is_enabled" && k != "expiration_time")
    {
        return Err(invalid());
    }
    let is_enabled = match fields.get("is_enabled") {
        Some(OptionValue::Bool(b)) => *b,
        _ => return Err(invalid()),
    };
    let expiration_time = match fields.get("expiration_time") {
        None | Some(OptionValue::Absent) => None,
        Some(OptionValue::Integer(hours)) => Some(*hours),
        Some(_) => return Err(invalid()),
    };
    Ok(StreamSpec {
        is_enabled,
        expiration_time,
    })
}

/// A single instant or a `(start, end)` pair.
pub fn time_range(value: &OptionValue) -> TableStoreResult<TimeRange> {
    match value {
        OptionValue::Integer(t) => Ok(TimeRange::specific(*t)),
        OptionValue::Pair(start, end) => Ok(TimeRange::between(*start, *end)),
        OptionValue::List(items) => match items.as_slice() {
            [OptionValue::Integer(start), OptionValue::Integer(end)] => {
                Ok(TimeRange::between(*start, *end))
            }
            _ => Err(TableStoreError::InvalidTimeRange(describe(value))),
        },
        _ => Err(TableStoreError::InvalidTimeRange(describe(value))),
    }
}

fn describe(value: &OptionValue) -> String {
    value
        .as_symbol()
        .map_or_else(|| format!("{value:?}"), str::to_owned)
}

// ---------------------------------------------------------------------------
// Schemas
// ---------------------------------------------------------------------------

option_schema!(GetRowRequest {
    "columns_to_get" => |r, k, v| { r.columns_to_get = columns(k, v)?; Ok(()) },
    "max_versions" => |r, k, v| { r.max_versions = Some(int(k, v)?); Ok(()) },
    "time_range" => |r, _, v| { r.time_range = Some(time_range(v)?); Ok(()) },
    "filter" => |r, k, v| { r.filter = Some(filter(k, v)?); Ok(()) },
    "start_column" => |r, k, v| { r.start_column = Some(text(k, v)?); Ok(()) },
    "end_column" => |r, k, v| { r.end_column = Some(text(k, v)?); Ok(()) },
    "transaction_id" => |r, k, v| { r.transaction_id = Some(text(k, v)?); Ok(()) },
});

option_schema!(PutRowRequest {
    "condition" => |r, k, v| { r.condition = write_condition(k, v)?; Ok(()) },
    "return_type" => |r, _, v| { r.return_type = return_type(v)?; Ok(()) },
    "transaction_id" => |r, k, v| { r.transaction_id = Some(text(k, v)?); Ok(()) },
});

option_schema!(UpdateRowRequest {
    "condition" => |r, k, v| { r.condition = write_condition(k, v)?; Ok(()) },
    "return_type" => |r, _, v| { r.return_type = return_type(v)?; Ok(()) },
    "return_columns" => |r, k, v| { r.return_columns = columns(k, v)?; Ok(()) },
    "transaction_id" => |r, k, v| { r.transaction_id = Some(text(k, v)?); Ok(()) },
});

option_schema!(DeleteRowRequest {
    "condition" => |r, k, v| { r.condition = write_condition(k, v)?; Ok(()) },
    "return_type" => |r, _, v| { r.return_type = return_type(v)?; Ok(()) },
    "transaction_id" => |r, k, v| { r.transaction_id = Some(text(k, v)?); Ok(()) },
});

option_schema!(GetRangeRequest {
    "direction" => |r, _, v| { r.direction = direction(v)?; Ok(()) },
    "columns_to_get" => |r, k, v| { r.columns_to_get = columns(k, v)?; Ok(()) },
    "max_versions" => |r, k, v| { r.max_versions = Some(int(k, v)?); Ok(()) },
    "time_range" => |r, _, v| { r.time_range = Some(time_range(v)?); Ok(()) },
    "limit" => |r, k, v| { r.limit = Some(int(k, v)?); Ok(()) },
    "filter" => |r, k, v| { r.filter = Some(filter(k, v)?); Ok(()) },
    "start_column" => |r, k, v| { r.start_column = Some(text(k, v)?); Ok(()) },
    "end_column" => |r, k, v| { r.end_column = Some(text(k, v)?); Ok(()) },
    "transaction_id" => |r, k, v| { r.transaction_id = Some(text(k, v)?); Ok(()) },
});

option_schema!(CreateTableRequest {
    "reserved_throughput_read" => |r, k, v| { r.reserved_throughput.read = int(k, v)?; Ok(()) },
    "reserved_throughput_write" => |r, k, v| { r.reserved_throughput.write = int(k, v)?; Ok(()) },
    "time_to_live" => |r, k, v| { r.table_options.time_to_live = Some(int(k, v)?); Ok(()) },
    "max_versions" => |r, k, v| { r.table_options.max_versions = Some(int(k, v)?); Ok(()) },
    "deviation_cell_version_in_sec" => |r, k, v| {
        r.table_options.deviation_cell_version_in_sec = Some(int(k, v)?);
        Ok(())
    },
    "allow_update" => |r, k, v| { r.table_options.allow_update = Some(flag(k, v)?); Ok(()) },
    "stream_spec" => |r, k, v| { r.stream_spec = Some(stream_spec(k, v)?); Ok(()) },
    "defined_columns" => |r, k, v| { r.defined_columns = schema_list(k, v)?; Ok(()) },
    "index_metas" => |r, k, v| { r.index_metas = schema_list(k, v)?; Ok(()) },
});

option_schema!(UpdateTableRequest {
    "reserved_throughput_read" => |r, k, v| { r.reserved_throughput_read = Some(int(k, v)?); Ok(()) },
    "reserved_throughput_write" => |r, k, v| { r.reserved_throughput_write = Some(int(k, v)?); Ok(()) },
    "time_to_live" => |r, k, v| { r.table_options.time_to_live = Some(int(k, v)?); Ok(()) },
    "max_versions" => |r, k, v| { r.table_options.max_versions = Some(int(k, v)?); Ok(()) },
    "deviation_cell_version_in_sec" => |r, k, v| {
        r.table_options.deviation_cell_version_in_sec = Some(int(k, v)?);
        Ok(())
    },
    "allow_update" => |r, k, v| { r.table_options.allow_update = Some(flag(k, v)?); Ok(()) },
    "stream_spec" => |r, k, v| { r.stream_spec = Some(stream_spec(k, v)?); Ok(()) },
});

option_schema!(MultiRowQueryCriteria {
    "columns_to_get" => |r, k, v| { r.columns_to_get = columns(k, v)?; Ok(()) },
    "max_versions" => |r, k, v| { r.max_versions = Some(int(k, v)?); Ok(()) },
    "time_range" => |r, _, v| { r.time_range = Some(time_range(v)?); Ok(()) },
    "filter" => |r, k, v| { r.filter = Some(filter(k, v)?); Ok(()) },
    "start_column" => |r, k, v| { r.start_column = Some(text(k, v)?); Ok(()) },
    "end_column" => |r, k, v| { r.end_column = Some(text(k, v)?); Ok(()) },
});

option_schema!(RowInBatchWriteRequest {
    "condition" => |r, k, v| { r.condition = write_condition(k, v)?; Ok(()) },
    "return_type" => |r, _, v| { r.return_type = return_type(v)?; Ok(()) },
    "return_columns" => |r, k, v| { r.return_columns = columns(k, v)?; Ok(()) },
});

option_schema!(BatchWriteRowRequest {
    "transaction_id" => |r, k, v| { r.transaction_id = Some(text(k, v)?); Ok(()) },
    "is_atomic" => |r, k, v| { r.is_atomic = Some(flag(k, v)?); Ok(()) },
});

option_schema!(SearchRequest {
    "search_query" => |r, k, v| { r.search_query = json(k, v)?; Ok(()) },
    "columns_to_get" => |r, k, v| { r.columns_to_get = columns(k, v)?; Ok(()) },
    "routing_values" => |r, k, v| { r.routing_values = primary_keys(k, v)?; Ok(()) },
    "timeout_ms" => |r, k, v| { r.timeout_ms = Some(int(k, v)?); Ok(()) },
});
