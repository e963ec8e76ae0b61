//! Operation enum and the request/response envelopes handed to the transport.

use std::fmt;

use crate::request::{
    AbortTransactionRequest, BatchGetRowRequest, BatchWriteRowRequest, CommitTransactionRequest,
    CreateTableRequest, DeleteRowRequest, DeleteTableRequest, DescribeTableRequest,
    GetRowRequest, ListTableRequest, PutRowRequest, SearchRequest,
    StartLocalTransactionRequest, UpdateRowRequest, UpdateTableRequest,
};
use crate::response::{
    AbortTransactionResponse, BatchGetRowResponse, BatchWriteRowResponse,
    CommitTransactionResponse, CreateTableResponse, DeleteTableResponse, DescribeTableResponse,
    GetRangeResponse, GetRowResponse, ListTableResponse, SearchResponse,
    StartLocalTransactionResponse, UpdateTableResponse, WriteRowResponse,
};

/// All supported table store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableStoreOperation {
    // Table management
    /// Create a new table.
    CreateTable,
    /// Delete a table.
    DeleteTable,
    /// List all tables.
    ListTable,
    /// Change throughput, retention, or stream settings.
    UpdateTable,
    /// Describe a table.
    DescribeTable,

    // Single-row operations
    /// Read one row.
    GetRow,
    /// Insert or replace one row.
    PutRow,
    /// Apply column operations to one row.
    UpdateRow,
    /// Delete one row.
    DeleteRow,

    // Multi-row operations
    /// Read rows from several tables.
    BatchGetRow,
    /// Write rows to several tables.
    BatchWriteRow,
    /// Scan a primary-key range.
    GetRange,
    /// Query a search index.
    Search,

    // Local transactions
    /// Open a transaction on one partition key.
    StartLocalTransaction,
    /// Commit a transaction.
    CommitTransaction,
    /// Abort a transaction.
    AbortTransaction,
}

impl TableStoreOperation {
    /// Returns the wire operation name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateTable => "CreateTable",
            Self::DeleteTable => "DeleteTable",
            Self::ListTable => "ListTable",
            Self::UpdateTable => "UpdateTable",
            Self::DescribeTable => "DescribeTable",
            Self::GetRow => "GetRow",
            Self::PutRow => "PutRow",
            Self::UpdateRow => "UpdateRow",
            Self::DeleteRow => "DeleteRow",
            Self::BatchGetRow => "BatchGetRow",
            Self::BatchWriteRow => "BatchWriteRow",
            Self::GetRange => "GetRange",
            Self::Search => "Search",
            Self::StartLocalTransaction => "StartLocalTransaction",
            Self::CommitTransaction => "CommitTransaction",
            Self::AbortTransaction => "AbortTransaction",
        }
    }

    /// Parse a wire operation name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CreateTable" => Some(Self::CreateTable),
            "DeleteTable" => Some(Self::DeleteTable),
            "ListTable" => Some(Self::ListTable),
            "UpdateTable" => Some(Self::UpdateTable),
            "DescribeTable" => Some(Self::DescribeTable),
            "GetRow" => Some(Self::GetRow),
            "PutRow" => Some(Self::PutRow),
            "UpdateRow" => Some(Self::UpdateRow),
            "DeleteRow" => Some(Self::DeleteRow),
            "BatchGetRow" => Some(Self::BatchGetRow),
            "BatchWriteRow" => Some(Self::BatchWriteRow),
            "GetRange" => Some(Self::GetRange),
            "Search" => Some(Self::Search),
            "StartLocalTransaction" => Some(Self::StartLocalTransaction),
            "CommitTransaction" => Some(Self::CommitTransaction),
            "AbortTransaction" => Some(Self::AbortTransaction),
            _ => None,
        }
    }
}

impl fmt::Display for TableStoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finished request record ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TableStoreRequest {
    /// `CreateTable`.
    CreateTable(CreateTableRequest),
    /// `DeleteTable`.
    DeleteTable(DeleteTableRequest),
    /// `ListTable`.
    ListTable(ListTableRequest),
    /// `UpdateTable`.
    UpdateTable(UpdateTableRequest),
    /// `DescribeTable`.
    DescribeTable(DescribeTableRequest),
    /// `GetRow`.
    GetRow(GetRowRequest),
    /// `PutRow`.
    PutRow(PutRowRequest),
    /// `UpdateRow`.
    UpdateRow(UpdateRowRequest),
    /// `DeleteRow`.
    DeleteRow(DeleteRowRequest),
    /// `BatchGetRow`.
    BatchGetRow(BatchGetRowRequest),
    /// `BatchWriteRow`.
    BatchWriteRow(BatchWriteRowRequest),
    /// `Search`.
    Search(SearchRequest),
    /// `StartLocalTransaction`.
    StartLocalTransaction(StartLocalTransactionRequest),
    /// `CommitTransaction`.
    CommitTransaction(CommitTransactionRequest),
    /// `AbortTransaction`.
    AbortTransaction(AbortTransactionRequest),
}

impl TableStoreRequest {
    /// The operation this request performs.
    #[must_use]
    pub fn operation(&self) -> TableStoreOperation {
        match self {
            Self::CreateTable(_) => TableStoreOperation::CreateTable,
            Self::DeleteTable(_) => TableStoreOperation::DeleteTable,
            Self::ListTable(_) => TableStoreOperation::ListTable,
            Self::UpdateTable(_) => TableStoreOperation::UpdateTable,
            Self::DescribeTable(_) => TableStoreOperation::DescribeTable,
            Self::GetRow(_) => TableStoreOperation::GetRow,
            Self::PutRow(_) => TableStoreOperation::PutRow,
            Self::UpdateRow(_) => TableStoreOperation::UpdateRow,
            Self::DeleteRow(_) => TableStoreOperation::DeleteRow,
            Self::BatchGetRow(_) => TableStoreOperation::BatchGetRow,
            Self::BatchWriteRow(_) => TableStoreOperation::BatchWriteRow,
            Self::Search(_) => TableStoreOperation::Search,
            Self::StartLocalTransaction(_) => TableStoreOperation::StartLocalTransaction,
            Self::CommitTransaction(_) => TableStoreOperation::CommitTransaction,
            Self::AbortTransaction(_) => TableStoreOperation::AbortTransaction,
        }
    }

    /// The table the request targets, when it targets exactly one.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        match self {
            Self::CreateTable(r) => Some(&r.table_name),
            Self::DeleteTable(r) => Some(&r.table_name),
            Self::UpdateTable(r) => Some(&r.table_name),
            Self::DescribeTable(r) => Some(&r.table_name),
            Self::GetRow(r) => Some(&r.table_name),
            Self::PutRow(r) => Some(&r.table_name),
            Self::UpdateRow(r) => Some(&r.table_name),
            Self::DeleteRow(r) => Some(&r.table_name),
            Self::Search(r) => Some(&r.table_name),
            Self::StartLocalTransaction(r) => Some(&r.table_name),
            Self::ListTable(_)
            | Self::BatchGetRow(_)
            | Self::BatchWriteRow(_)
            | Self::CommitTransaction(_)
            | Self::AbortTransaction(_) => None,
        }
    }
}

/// A response record produced by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TableStoreResponse {
    /// `CreateTable`.
    CreateTable(CreateTableResponse),
    /// `DeleteTable`.
    DeleteTable(DeleteTableResponse),
    /// `ListTable`.
    ListTable(ListTableResponse),
    /// `UpdateTable`.
    UpdateTable(UpdateTableResponse),
    /// `DescribeTable`.
    DescribeTable(DescribeTableResponse),
    /// `GetRow`.
    GetRow(GetRowResponse),
    /// `PutRow`, `UpdateRow`, or `DeleteRow`.
    WriteRow(WriteRowResponse),
    /// `BatchGetRow`.
    BatchGetRow(BatchGetRowResponse),
    /// `BatchWriteRow`.
    BatchWriteRow(BatchWriteRowResponse),
    /// `GetRange`.
    GetRange(GetRangeResponse),
    /// `Search`.
    Search(SearchResponse),
    /// `StartLocalTransaction`.
    StartLocalTransaction(StartLocalTransactionResponse),
    /// `CommitTransaction`.
    CommitTransaction(CommitTransactionResponse),
    /// `AbortTransaction`.
    AbortTransaction(AbortTransactionResponse),
}

impl TableStoreResponse {
    /// Short name of the response kind, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateTable(_) => "CreateTable",
            Self::DeleteTable(_) => "DeleteTable",
            Self::ListTable(_) => "ListTable",
            Self::UpdateTable(_) => "UpdateTable",
            Self::DescribeTable(_) => "DescribeTable",
            Self::GetRow(_) => "GetRow",
            Self::WriteRow(_) => "WriteRow",
            Self::BatchGetRow(_) => "BatchGetRow",
            Self::BatchWriteRow(_) => "BatchWriteRow",
            Self::GetRange(_) => "GetRange",
            Self::Search(_) => "Search",
            Self::StartLocalTransaction(_) => "StartLocalTransaction",
            Self::CommitTransaction(_) => "CommitTransaction",
            Self::AbortTransaction(_) => "AbortTransaction",
        }
    }
}
