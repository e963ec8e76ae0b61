//! Request records for every table store operation.
//!
//! Each record is flat and field-named. Mandatory fields are set by the
//! constructors; every other field starts at its zero value (`None`, empty
//! `Vec`, default enum) which means "do not send" to the transport.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter::{Condition, FilterNode};
use crate::options::ColumnOperand;
use crate::types::{
    BatchWriteKind, DefinedColumnSchema, Direction, IndexMeta, OperationKind, PrimaryKeySchema,
    ReservedThroughput, ReturnType, StreamSpec, TableOptions, TimeRange,
};
use crate::value::{Column, PrimaryKey, PrimaryKeyColumn};

/// Update operand lists keyed by kind. Iteration follows the declaration
/// order of [`OperationKind`].
pub type UpdateSet = BTreeMap<OperationKind, Vec<ColumnOperand>>;

// ---------------------------------------------------------------------------
// Table management
// ---------------------------------------------------------------------------

/// Request for the `CreateTable` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTableRequest {
    /// Name of the table to create.
    pub table_name: String,
    /// Primary-key schema in key order.
    pub primary_keys: Vec<PrimaryKeySchema>,
    /// Pre-defined attribute columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defined_columns: Vec<DefinedColumnSchema>,
    /// Secondary indexes created with the table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index_metas: Vec<IndexMeta>,
    /// Reserved capacity.
    pub reserved_throughput: ReservedThroughput,
    /// Retention options.
    pub table_options: TableOptions,
    /// Change-stream settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_spec: Option<StreamSpec>,
}

impl CreateTableRequest {
    /// Create a request with service defaults for every optional field.
    #[must_use]
    pub fn new(table_name: impl Into<String>, primary_keys: Vec<PrimaryKeySchema>) -> Self {
        Self {
            table_name: table_name.into(),
            primary_keys,
            table_options: TableOptions::create_defaults(),
            ..Self::default()
        }
    }
}

/// Request for the `DeleteTable` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteTableRequest {
    /// Name of the table to delete.
    pub table_name: String,
}

/// Request for the `DescribeTable` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTableRequest {
    /// Name of the table to describe.
    pub table_name: String,
}

/// Request for the `ListTable` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTableRequest {}

/// Request for the `UpdateTable` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateTableRequest {
    /// Name of the table to update.
    pub table_name: String,
    /// New reserved read capacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_throughput_read: Option<i64>,
    /// New reserved write capacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_throughput_write: Option<i64>,
    /// Retention options to change; unset fields are left alone.
    pub table_options: TableOptions,
    /// New change-stream settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_spec: Option<StreamSpec>,
}

impl UpdateTableRequest {
    /// Create a request that changes nothing yet.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Single-row operations
// ---------------------------------------------------------------------------

/// Request for the `GetRow` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRowRequest {
    /// Table to read from.
    pub table_name: String,
    /// Key of the row.
    pub primary_key: PrimaryKey,
    /// Attribute columns to return; empty returns all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns_to_get: Vec<String>,
    /// Number of versions to return per column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_versions: Option<i64>,
    /// Version filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    /// Server-side row filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterNode>,
    /// First attribute column returned (wide-row paging).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<String>,
    /// Attribute column at which the returned slice stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<String>,
    /// Local transaction the read belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl GetRowRequest {
    /// Create a request for one row.
    #[must_use]
    pub fn new(table_name: impl Into<String>, primary_key: PrimaryKey) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key,
            ..Self::default()
        }
    }
}

/// Request for the `PutRow` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutRowRequest {
    /// Table to write to.
    pub table_name: String,
    /// Key of the row.
    pub primary_key: PrimaryKey,
    /// Attribute columns written.
    #[serde(default)]
    pub attribute_columns: Vec<Column>,
    /// Write precondition.
    pub condition: Condition,
    /// What the write returns.
    pub return_type: ReturnType,
    /// Local transaction the write belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl PutRowRequest {
    /// Create an unconditional put.
    #[must_use]
    pub fn new(
        table_name: impl Into<String>,
        primary_key: PrimaryKey,
        attribute_columns: Vec<Column>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key,
            attribute_columns,
            ..Self::default()
        }
    }
}

/// Request for the `UpdateRow` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRowRequest {
    /// Table to write to.
    pub table_name: String,
    /// Key of the row.
    pub primary_key: PrimaryKey,
    /// Column operations grouped by kind.
    #[serde(default)]
    pub updates: UpdateSet,
    /// Write precondition.
    pub condition: Condition,
    /// What the write returns.
    pub return_type: ReturnType,
    /// Columns returned with `ReturnType::AfterModify`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub return_columns: Vec<String>,
    /// Local transaction the write belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl UpdateRowRequest {
    /// Create an update with no operations yet.
    #[must_use]
    pub fn new(table_name: impl Into<String>, primary_key: PrimaryKey) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key,
            ..Self::default()
        }
    }
}

/// Request for the `DeleteRow` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRowRequest {
    /// Table to delete from.
    pub table_name: String,
    /// Key of the row.
    pub primary_key: PrimaryKey,
    /// Write precondition.
    pub condition: Condition,
    /// What the write returns.
    pub return_type: ReturnType,
    /// Local transaction the delete belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl DeleteRowRequest {
    /// Create an unconditional delete.
    #[must_use]
    pub fn new(table_name: impl Into<String>, primary_key: PrimaryKey) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Range scan
// ---------------------------------------------------------------------------

/// Request for the `GetRange` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRangeRequest {
    /// Table to scan.
    pub table_name: String,
    /// Scan direction.
    pub direction: Direction,
    /// Attribute columns to return; empty returns all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns_to_get: Vec<String>,
    /// Number of versions to return per column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_versions: Option<i64>,
    /// Version filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    /// Maximum number of rows per response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Inclusive start of the scan. Empty when resuming from a token.
    #[serde(default)]
    pub inclusive_start_primary_key: PrimaryKey,
    /// Exclusive end of the scan.
    pub exclusive_end_primary_key: PrimaryKey,
    /// Server-side row filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterNode>,
    /// First attribute column returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<String>,
    /// Attribute column at which the returned slice stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<String>,
    /// Continuation token of a previous scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<bytes::Bytes>,
    /// Local transaction the scan belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl GetRangeRequest {
    /// Create a scan over `[start, end)`.
    #[must_use]
    pub fn new(
        table_name: impl Into<String>,
        inclusive_start_primary_key: PrimaryKey,
        exclusive_end_primary_key: PrimaryKey,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            inclusive_start_primary_key,
            exclusive_end_primary_key,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Batch operations
// ---------------------------------------------------------------------------

/// Rows to read from one table within a `BatchGetRow` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultiRowQueryCriteria {
    /// Table to read from.
    pub table_name: String,
    /// Keys of the rows.
    pub primary_keys: Vec<PrimaryKey>,
    /// Attribute columns to return; empty returns all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns_to_get: Vec<String>,
    /// Number of versions to return per column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_versions: Option<i64>,
    /// Version filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    /// Server-side row filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterNode>,
    /// First attribute column returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<String>,
    /// Attribute column at which the returned slice stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<String>,
}

impl MultiRowQueryCriteria {
    /// Create criteria for a set of rows in one table.
    #[must_use]
    pub fn new(table_name: impl Into<String>, primary_keys: Vec<PrimaryKey>) -> Self {
        Self {
            table_name: table_name.into(),
            primary_keys,
            ..Self::default()
        }
    }
}

/// Request for the `BatchGetRow` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchGetRowRequest {
    /// Per-table read criteria.
    pub tables: Vec<MultiRowQueryCriteria>,
}

/// One row write within a `BatchWriteRow` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RowInBatchWriteRequest {
    /// Kind of write.
    pub kind: BatchWriteKind,
    /// Key of the row.
    pub primary_key: PrimaryKey,
    /// Attribute columns written by a put.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_columns: Vec<Column>,
    /// Column operations of an update.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub updates: UpdateSet,
    /// Write precondition.
    pub condition: Condition,
    /// What the write returns.
    pub return_type: ReturnType,
    /// Columns returned with `ReturnType::AfterModify`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub return_columns: Vec<String>,
}

impl RowInBatchWriteRequest {
    /// Create a row write of the given kind.
    #[must_use]
    pub fn new(kind: BatchWriteKind, primary_key: PrimaryKey) -> Self {
        Self {
            kind,
            primary_key,
            attribute_columns: Vec::new(),
            updates: UpdateSet::new(),
            condition: Condition::default(),
            return_type: ReturnType::default(),
            return_columns: Vec::new(),
        }
    }
}

/// Rows to write into one table within a `BatchWriteRow` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableInBatchWriteRequest {
    /// Table to write to.
    pub table_name: String,
    /// Row writes in submission order.
    pub rows: Vec<RowInBatchWriteRequest>,
}

impl TableInBatchWriteRequest {
    /// Group row writes under a table.
    #[must_use]
    pub fn new(table_name: impl Into<String>, rows: Vec<RowInBatchWriteRequest>) -> Self {
        Self {
            table_name: table_name.into(),
            rows,
        }
    }
}

/// Request for the `BatchWriteRow` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteRowRequest {
    /// Per-table writes.
    pub tables: Vec<TableInBatchWriteRequest>,
    /// Local transaction the batch belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Whether the batch must apply all-or-nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_atomic: Option<bool>,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Request for the `Search` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchRequest {
    /// Table owning the search index.
    pub table_name: String,
    /// Search index to query.
    pub index_name: String,
    /// Query body, passed through to the transport untouched.
    pub search_query: serde_json::Value,
    /// Attribute columns to return; empty returns none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns_to_get: Vec<String>,
    /// Partition keys restricting which shards are searched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routing_values: Vec<PrimaryKey>,
    /// Server-side timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<i64>,
}

impl SearchRequest {
    /// Create a search over an index with an empty query.
    #[must_use]
    pub fn new(table_name: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            index_name: index_name.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Local transactions
// ---------------------------------------------------------------------------

/// Request for the `StartLocalTransaction` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartLocalTransactionRequest {
    /// Table the transaction is scoped to.
    pub table_name: String,
    /// Partition key the transaction is scoped to.
    pub key: PrimaryKeyColumn,
}

/// Request for the `CommitTransaction` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommitTransactionRequest {
    /// Transaction to commit.
    pub transaction_id: String,
}

/// Request for the `AbortTransaction` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AbortTransactionRequest {
    /// Transaction to abort.
    pub transaction_id: String,
}
