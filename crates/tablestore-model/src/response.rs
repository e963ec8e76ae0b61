//! Response records produced by the transport for each operation.

use serde::{Deserialize, Serialize};

use crate::types::TableMeta;
use crate::value::{PrimaryKey, Row};

/// Read/write capacity consumed by a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConsumedCapacity {
    /// Read capacity units consumed.
    pub read: i64,
    /// Write capacity units consumed.
    pub write: i64,
}

// ---------------------------------------------------------------------------
// Table management
// ---------------------------------------------------------------------------

/// Response of the `CreateTable` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTableResponse {}

/// Response of the `DeleteTable` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTableResponse {}

/// Response of the `UpdateTable` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateTableResponse {
    /// Table description after the update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_meta: Option<TableMeta>,
}

/// Response of the `DescribeTable` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTableResponse {
    /// Table description.
    pub table_meta: TableMeta,
}

/// Response of the `ListTable` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTableResponse {
    /// Names of all tables of the instance.
    #[serde(default)]
    pub table_names: Vec<String>,
}

// ---------------------------------------------------------------------------
// Single-row operations
// ---------------------------------------------------------------------------

/// Response of the `GetRow` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRowResponse {
    /// The row, or `None` if it does not exist or was filtered out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<Row>,
    /// Capacity consumed.
    #[serde(default)]
    pub consumed: ConsumedCapacity,
}

/// Response of the `PutRow`, `UpdateRow`, and `DeleteRow` operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WriteRowResponse {
    /// Row data selected by the request's return type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<Row>,
    /// Capacity consumed.
    #[serde(default)]
    pub consumed: ConsumedCapacity,
}

// ---------------------------------------------------------------------------
// Range scan
// ---------------------------------------------------------------------------

/// Response of the `GetRange` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRangeResponse {
    /// Rows in scan order.
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Where the next page starts; `None` when the range is exhausted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_start_primary_key: Option<PrimaryKey>,
    /// Opaque continuation token, when the server issues one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<bytes::Bytes>,
    /// Capacity consumed.
    #[serde(default)]
    pub consumed: ConsumedCapacity,
}

// ---------------------------------------------------------------------------
// Batch operations
// ---------------------------------------------------------------------------

/// Outcome for one row of a batch request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RowInBatchResult {
    /// Whether the row operation succeeded.
    pub is_ok: bool,
    /// Row data, for reads and writes with a return type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<Row>,
    /// Service error code when `is_ok` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Service error message when `is_ok` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Per-table outcomes of a batch request, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableInBatchResult {
    /// Table name.
    pub table_name: String,
    /// Row outcomes in request order.
    pub rows: Vec<RowInBatchResult>,
}

/// Response of the `BatchGetRow` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchGetRowResponse {
    /// Per-table outcomes.
    pub tables: Vec<TableInBatchResult>,
}

/// Response of the `BatchWriteRow` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteRowResponse {
    /// Per-table outcomes.
    pub tables: Vec<TableInBatchResult>,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Response of the `Search` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResponse {
    /// Matching rows.
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Total number of hits, when requested by the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_hits: Option<i64>,
    /// Whether every shard answered.
    #[serde(default)]
    pub is_all_succeeded: bool,
    /// Token for the next page of hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<bytes::Bytes>,
}

// ---------------------------------------------------------------------------
// Local transactions
// ---------------------------------------------------------------------------

/// Response of the `StartLocalTransaction` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartLocalTransactionResponse {
    /// Identifier to pass as `transaction_id` on subsequent requests.
    pub transaction_id: String,
}

/// Response of the `CommitTransaction` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTransactionResponse {}

/// Response of the `AbortTransaction` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbortTransactionResponse {}
